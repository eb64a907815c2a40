//! Forum adapter
//!
//! Implementation of the forum client over a Discourse-style JSON API.

pub mod client;

pub use client::DiscourseForumClient;
