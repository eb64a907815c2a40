//! UI state handlers

use axum::{extract::State, Extension, Json};

use crate::domain::entities::{UiAction, UiState, User};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::AppState;

/// GET /api/ui-state
pub async fn get_ui_state(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<UiState>, AppError> {
    Ok(Json(state.ui_state_service.get(&user).await?))
}

/// POST /api/ui-state/actions
pub async fn dispatch_ui_action(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(action): JsonBody<UiAction>,
) -> Result<Json<UiState>, AppError> {
    Ok(Json(state.ui_state_service.dispatch(&user, action).await?))
}
