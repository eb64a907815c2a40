//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod forum;
pub mod memory;
pub mod woocommerce;

pub use forum::DiscourseForumClient;
pub use memory::{
    InMemoryInvoiceRepository, InMemoryNotificationRepository, InMemoryUiStateRepository,
    InMemoryUserRepository,
};
pub use woocommerce::WooCommerceClient;
