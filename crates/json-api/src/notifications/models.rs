//! Notification response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dailybrew_app::domain::notifications::models::Notification;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            uuid: notification.uuid.into_uuid(),
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            is_read: notification.is_read,
            created_at: notification.created_at.to_string(),
        }
    }
}
