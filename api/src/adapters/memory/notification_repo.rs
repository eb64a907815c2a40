//! In-memory notification lists

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{Notification, NotificationId, UserId, MAX_NOTIFICATIONS_PER_USER};
use crate::domain::ports::NotificationRepository;
use crate::error::DomainError;

/// Lists are stored newest first
#[derive(Default)]
pub struct InMemoryNotificationRepository {
    lists: RwLock<HashMap<UserId, VecDeque<Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn push(&self, notification: Notification) -> Result<(), DomainError> {
        let mut lists = self.lists.write().await;
        let list = lists.entry(notification.user_id).or_default();
        list.push_front(notification);
        list.truncate(MAX_NOTIFICATIONS_PER_USER);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        Ok(self
            .lists
            .read()
            .await
            .get(user_id)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, DomainError> {
        let mut lists = self.lists.write().await;
        let found = lists
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|n| n.id == *id));

        match found {
            Some(notification) => {
                notification.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<usize, DomainError> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.get_mut(user_id) else {
            return Ok(0);
        };

        let mut updated = 0;
        for notification in list.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
