//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod finance_service;
pub mod invoice_service;
pub mod notification_service;
pub mod ui_state_service;
pub mod user_service;

pub use finance_service::FinanceService;
pub use invoice_service::InvoiceService;
pub use notification_service::{NotificationList, NotificationService};
pub use ui_state_service::UiStateService;
pub use user_service::{hash_api_key, UserService};
