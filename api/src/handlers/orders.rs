//! Order handlers
//!
//! Seller-scoped pass-through to WooCommerce orders.

use axum::{
    extract::State,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::{Role, User};
use crate::domain::ports::{OrderQuery, Page};
use crate::error::AppError;
use crate::extract::QueryParams;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub seller_id: Option<i64>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Work out which seller's orders to fetch.
/// Admin and logistics must name one; sellers default to their own.
fn order_seller(user: &User, requested: Option<i64>) -> Result<i64, AppError> {
    match user.role {
        Role::Admin | Role::Logistics => {
            requested.ok_or_else(|| AppError::BadRequest("seller_id is required".to_string()))
        }
        Role::Seller => {
            let own = user.seller_id.ok_or(AppError::Forbidden)?;
            match requested {
                Some(id) if id != own => Err(AppError::Forbidden),
                _ => Ok(own),
            }
        }
    }
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    QueryParams(query): QueryParams<ListOrdersQuery>,
) -> Result<Json<Value>, AppError> {
    let seller_id = order_seller(&user, query.seller_id)?;

    let query = OrderQuery {
        seller_id,
        page: Page::new(query.page, query.per_page),
        status: query
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    Ok(Json(state.marketplace.list_orders(&query).await?))
}
