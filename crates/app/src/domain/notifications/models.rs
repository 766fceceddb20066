//! Notification Models

use jiff::Timestamp;

use crate::{domain::users::models::UserUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<Notification>;

/// Notification Model
#[derive(Debug, Clone)]
pub struct Notification {
    pub uuid: NotificationUuid,
    pub user_uuid: UserUuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: Timestamp,
}
