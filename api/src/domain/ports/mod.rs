//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod forum;
pub mod marketplace;
pub mod repositories;

pub use forum::{ForumCategory, ForumClient, ForumTopic};
pub use marketplace::{MarketplaceClient, OrderQuery, Page, ProductQuery, StoreQuery};
pub use repositories::{
    InvoiceRepository, NotificationRepository, UiStateRepository, UserRepository,
};
