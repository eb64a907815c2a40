//! Forum client port trait
//!
//! The forum speaks a Discourse-style JSON API; the adapter reshapes its
//! responses into these types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// A forum topic as shown in the community widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumTopic {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub posts_count: i64,
    #[serde(default)]
    pub reply_count: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub last_posted_at: Option<String>,
}

/// A forum category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topic_count: i64,
}

/// Port trait for forum operations
#[async_trait]
pub trait ForumClient: Send + Sync {
    /// Latest topics, optionally restricted to a category slug or id
    async fn latest_topics(
        &self,
        category: Option<&str>,
        page: u32,
    ) -> Result<Vec<ForumTopic>, UpstreamError>;

    /// All visible categories
    async fn list_categories(&self) -> Result<Vec<ForumCategory>, UpstreamError>;
}
