//! UI state service

use std::sync::Arc;

use crate::domain::entities::{UiAction, UiState, User};
use crate::domain::ports::UiStateRepository;
use crate::error::AppError;

pub struct UiStateService {
    states: Arc<dyn UiStateRepository>,
}

impl UiStateService {
    pub fn new(states: Arc<dyn UiStateRepository>) -> Self {
        Self { states }
    }

    pub async fn get(&self, user: &User) -> Result<UiState, AppError> {
        Ok(self.states.get(&user.id).await?)
    }

    /// Apply an action to the user's state and store the result
    pub async fn dispatch(&self, user: &User, action: UiAction) -> Result<UiState, AppError> {
        let next = self.states.apply(&user.id, action).await?;
        tracing::debug!(user_id = %user.id, ?action, "UI action applied");
        Ok(next)
    }
}
