//! Domain entities
//!
//! Plain data shapes shared by the dashboard frontend and the services.

pub mod finance;
pub mod invoice;
pub mod notification;
pub mod ui_state;
pub mod user;

pub use finance::FinanceStats;
pub use invoice::{
    format_invoice_number, Invoice, InvoiceId, InvoiceKind, InvoiceStatus, NewInvoice,
};
pub use notification::{
    Notification, NotificationId, NotificationKind, MAX_NOTIFICATIONS_PER_USER,
};
pub use ui_state::{UiAction, UiState};
pub use user::{NewUser, Role, User, UserId};
