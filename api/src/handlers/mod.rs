//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod catalog;
pub mod finance;
pub mod forum;
pub mod invoices;
pub mod notifications;
pub mod orders;
pub mod session;
pub mod ui_state;
pub mod webhooks;

pub use catalog::{get_store, list_products, list_store_products, list_stores};
pub use finance::get_summary;
pub use forum::{list_categories, list_topics};
pub use invoices::{create_invoice, get_invoice, list_invoices, update_invoice};
pub use notifications::{list_notifications, mark_all_read, mark_read};
pub use orders::list_orders;
pub use session::get_me;
pub use ui_state::{dispatch_ui_action, get_ui_state};
pub use webhooks::woocommerce_webhook;
