//! Finance handlers

use axum::{
    extract::State,
    Extension, Json,
};
use serde::Deserialize;

use crate::domain::entities::{FinanceStats, User};
use crate::error::AppError;
use crate::extract::QueryParams;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub seller_id: Option<i64>,
}

/// GET /api/finance/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    QueryParams(query): QueryParams<SummaryQuery>,
) -> Result<Json<FinanceStats>, AppError> {
    Ok(Json(
        state.finance_service.summary(&user, query.seller_id).await?,
    ))
}
