//! Session handlers

use axum::{Extension, Json};
use serde::Serialize;

use crate::domain::entities::{Role, User};

/// Profile of the authenticated caller
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub seller_id: Option<i64>,
}

/// GET /api/me
pub async fn get_me(Extension(user): Extension<User>) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id.to_string(),
        name: user.name,
        email: user.email,
        role: user.role,
        seller_id: user.seller_id,
    })
}
