//! Dashboard UI state
//!
//! The two global flags the dashboard shell keeps per user, and the reducer
//! that moves between them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub sidebar_open: bool,
    pub modal_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            modal_open: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiAction {
    ToggleSidebar,
    SetSidebar { open: bool },
    OpenModal,
    CloseModal,
}

impl UiState {
    pub fn reduce(self, action: UiAction) -> Self {
        match action {
            UiAction::ToggleSidebar => Self {
                sidebar_open: !self.sidebar_open,
                ..self
            },
            UiAction::SetSidebar { open } => Self {
                sidebar_open: open,
                ..self
            },
            UiAction::OpenModal => Self {
                modal_open: true,
                ..self
            },
            UiAction::CloseModal => Self {
                modal_open: false,
                ..self
            },
        }
    }
}
