//! Invoice handlers
//!
//! Rapifac invoice routes backed by the in-memory invoice store.

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_role;
use crate::domain::entities::{Invoice, InvoiceId, InvoiceStatus, NewInvoice, Role, User};
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub seller_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
    pub count: usize,
}

/// Request to change an invoice's status
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub status: String,
}

/// GET /api/rapifac/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    QueryParams(query): QueryParams<ListInvoicesQuery>,
) -> Result<Json<InvoiceListResponse>, AppError> {
    let invoices = state.invoice_service.list(&user, query.seller_id).await?;

    Ok(Json(InvoiceListResponse {
        count: invoices.len(),
        invoices,
    }))
}

/// GET /api/rapifac/invoices/:id
pub async fn get_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state.invoice_service.get(&user, &InvoiceId(id)).await?;
    Ok(Json(invoice))
}

/// POST /api/rapifac/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<NewInvoice>,
) -> Result<(StatusCode, Json<Invoice>), AppError> {
    let invoice = state.invoice_service.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// PATCH /api/rapifac/invoices/:id
///
/// Admin only.
pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(request): JsonBody<UpdateInvoiceRequest>,
) -> Result<Json<Invoice>, AppError> {
    require_role(&user, &[Role::Admin])?;

    let status: InvoiceStatus = request.status.parse().map_err(AppError::BadRequest)?;

    let invoice = state
        .invoice_service
        .update_status(&user, &InvoiceId(id), status)
        .await?;

    Ok(Json(invoice))
}
