//! Notification service
//!
//! Appends notifications to user lists and fans seller events out to the
//! people who care about them.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::domain::entities::{Notification, NotificationId, NotificationKind, User, UserId};
use crate::domain::ports::{NotificationRepository, UserRepository};
use crate::error::AppError;

pub const WELCOME_TITLE: &str = "Welcome to your dashboard";

/// A user's notification list with its unread count
#[derive(Debug, Clone, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notifications,
            users,
        }
    }

    pub async fn push(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<Notification, AppError> {
        let notification = Notification::new(user_id, kind, title, body);
        self.notifications.push(notification.clone()).await?;
        Ok(notification)
    }

    /// Notify every user of a seller plus all admins. Returns how many were notified.
    pub async fn notify_seller(
        &self,
        seller_id: i64,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<usize, AppError> {
        let mut recipients: Vec<User> = self.users.find_by_seller(seller_id).await?;
        recipients.extend(self.users.find_admins().await?);

        for user in &recipients {
            self.push(user.id, kind, title, body).await?;
        }

        tracing::debug!(seller_id, kind = %kind, recipients = recipients.len(), "Seller notified");
        Ok(recipients.len())
    }

    pub async fn list(&self, user: &User, unread_only: bool) -> Result<NotificationList, AppError> {
        let all = self.notifications.list_for_user(&user.id).await?;
        let unread = all.iter().filter(|n| !n.read).count();
        let notifications = if unread_only {
            all.into_iter().filter(|n| !n.read).collect()
        } else {
            all
        };

        Ok(NotificationList {
            notifications,
            unread,
        })
    }

    pub async fn mark_read(&self, user: &User, id: &NotificationId) -> Result<(), AppError> {
        if self.notifications.mark_read(&user.id, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Notification {} not found", id)))
        }
    }

    pub async fn mark_all_read(&self, user: &User) -> Result<usize, AppError> {
        Ok(self.notifications.mark_all_read(&user.id).await?)
    }

    /// After `delay`, append a welcome notification for every known user.
    /// Stands in for a realtime push channel.
    pub fn schedule_welcome(self: Arc<Self>, delay: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let users = match self.users.list_all().await {
                Ok(users) => users,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to list users for welcome notification");
                    return;
                }
            };

            for user in &users {
                let body = format!("Signed in as {} ({})", user.name, user.role);
                if let Err(e) = self
                    .push(user.id, NotificationKind::System, WELCOME_TITLE, &body)
                    .await
                {
                    tracing::warn!(error = %e, user_id = %user.id, "Failed to push welcome notification");
                }
            }

            tracing::info!(users = users.len(), "Welcome notifications delivered");
        })
    }
}
