//! Notification handlers

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::NotificationList;
use crate::domain::entities::{NotificationId, User};
use crate::error::AppError;
use crate::extract::{PathParam, QueryParams};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    QueryParams(query): QueryParams<ListNotificationsQuery>,
) -> Result<Json<NotificationList>, AppError> {
    Ok(Json(
        state
            .notification_service
            .list(&user, query.unread_only)
            .await?,
    ))
}

/// POST /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .notification_service
        .mark_read(&user, &NotificationId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<MarkAllReadResponse>, AppError> {
    let updated = state.notification_service.mark_all_read(&user).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}
