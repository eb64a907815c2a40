//! Discourse-style forum API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::ports::{ForumCategory, ForumClient, ForumTopic};
use crate::error::UpstreamError;

const SERVICE: &str = "Forum";

pub struct DiscourseForumClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    api_username: Option<String>,
}

impl DiscourseForumClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        api_username: Option<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        });

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_username,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let mut request = self
            .http
            .get(self.api_url(path))
            .header("Accept", "application/json")
            .query(query);

        if let Some(key) = &self.api_key {
            request = request.header("Api-Key", key);
        }
        if let Some(username) = &self.api_username {
            request = request.header("Api-Username", username);
        }

        let resp = request.send().await?;
        let status = resp.status();
        tracing::debug!(service = SERVICE, path, status = status.as_u16(), "Upstream response");

        if status.is_success() {
            resp.json()
                .await
                .map_err(|e| UpstreamError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(UpstreamError::Unauthorized { service: SERVICE })
        } else if status.as_u16() == 429 {
            Err(UpstreamError::RateLimited { service: SERVICE })
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(UpstreamError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Response types from the forum API
#[derive(Deserialize)]
struct TopicListResponse {
    topic_list: TopicList,
}

#[derive(Deserialize)]
struct TopicList {
    #[serde(default)]
    topics: Vec<ForumTopic>,
}

#[derive(Deserialize)]
struct CategoryListResponse {
    category_list: CategoryList,
}

#[derive(Deserialize)]
struct CategoryList {
    #[serde(default)]
    categories: Vec<ForumCategory>,
}

#[async_trait]
impl ForumClient for DiscourseForumClient {
    async fn latest_topics(
        &self,
        category: Option<&str>,
        page: u32,
    ) -> Result<Vec<ForumTopic>, UpstreamError> {
        let path = match category {
            Some(category) => format!("/c/{}.json", encode(category)),
            None => "/latest.json".to_string(),
        };

        // Forum pages are zero-based, ours start at one
        let query = [("page", page.saturating_sub(1).to_string())];

        let resp: TopicListResponse = self.get(&path, &query).await?;
        Ok(resp.topic_list.topics)
    }

    async fn list_categories(&self) -> Result<Vec<ForumCategory>, UpstreamError> {
        let resp: CategoryListResponse = self.get("/categories.json", &[]).await?;
        Ok(resp.category_list.categories)
    }
}
