//! Forum handlers
//!
//! Public routes over the community forum, reshaped for the dashboard.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ForumCategory, ForumTopic};
use crate::error::AppError;
use crate::extract::QueryParams;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: Vec<ForumTopic>,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<ForumCategory>,
}

/// GET /api/forum/topics
pub async fn list_topics(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TopicsQuery>,
) -> Result<Json<TopicsResponse>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let topics = state.forum.latest_topics(category, page).await?;

    Ok(Json(TopicsResponse { topics, page }))
}

/// GET /api/forum/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.forum.list_categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
