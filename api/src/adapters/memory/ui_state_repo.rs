//! In-memory UI state store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{UiAction, UiState, UserId};
use crate::domain::ports::UiStateRepository;
use crate::error::DomainError;

#[derive(Default)]
pub struct InMemoryUiStateRepository {
    states: RwLock<HashMap<UserId, UiState>>,
}

impl InMemoryUiStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UiStateRepository for InMemoryUiStateRepository {
    async fn get(&self, user_id: &UserId) -> Result<UiState, DomainError> {
        Ok(self
            .states
            .read()
            .await
            .get(user_id)
            .copied()
            .unwrap_or_default())
    }

    async fn apply(&self, user_id: &UserId, action: UiAction) -> Result<UiState, DomainError> {
        let mut states = self.states.write().await;
        let state = states.entry(*user_id).or_default();
        *state = state.reduce(action);
        Ok(*state)
    }
}
