//! WooCommerce / Dokan adapter
//!
//! Implementation of the marketplace client over the WordPress REST API.

pub mod client;

pub use client::WooCommerceClient;
