//! Catalog handlers
//!
//! Public pass-through routes to WooCommerce products and Dokan stores.
//! Upstream payloads are returned exactly as received.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::{Page, ProductQuery, StoreQuery};
use crate::error::AppError;
use crate::extract::{PathParam, QueryParams};
use crate::AppState;

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub orderby: Option<String>,
    pub order: Option<String>,
}

/// Query parameters for listing stores
#[derive(Debug, Deserialize)]
pub struct ListStoresQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

/// Paging-only query parameters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListProductsQuery>,
) -> Result<Json<Value>, AppError> {
    let query = ProductQuery {
        page: Page::new(query.page, query.per_page),
        search: non_blank(query.search),
        category: non_blank(query.category),
        orderby: non_blank(query.orderby),
        order: non_blank(query.order),
    };

    Ok(Json(state.marketplace.list_products(&query).await?))
}

/// GET /api/stores
pub async fn list_stores(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListStoresQuery>,
) -> Result<Json<Value>, AppError> {
    let query = StoreQuery {
        page: Page::new(query.page, query.per_page),
        search: non_blank(query.search),
    };

    Ok(Json(state.marketplace.list_stores(&query).await?))
}

/// GET /api/stores/:id
pub async fn get_store(
    State(state): State<AppState>,
    PathParam(store_id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.marketplace.get_store(store_id).await?))
}

/// GET /api/stores/:id/products
pub async fn list_store_products(
    State(state): State<AppState>,
    PathParam(store_id): PathParam<i64>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Value>, AppError> {
    let page = Page::new(query.page, query.per_page);
    Ok(Json(
        state.marketplace.list_store_products(store_id, page).await?,
    ))
}
