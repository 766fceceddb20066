//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::{
            errors::NotificationsServiceError,
            models::{Notification, NotificationUuid},
            repository::PgNotificationsRepository,
        },
        users::models::UserUuid,
    },
    pagination::{Page, PagedResult},
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<PagedResult<Notification>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count(&mut tx, user).await?;

        let notifications = self
            .repository
            .list(&mut tx, user, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(PagedResult {
            items: notifications,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.mark_read(&mut tx, notification, user).await?;

        if rows_affected == 0 {
            return Err(NotificationsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn unread_count(&self, user: UserUuid) -> Result<i64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_unread(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// List the user's notifications, newest first.
    async fn list(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<PagedResult<Notification>, NotificationsServiceError>;

    /// Mark an owned notification as read.
    async fn mark_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError>;

    /// Number of unread notifications.
    async fn unread_count(&self, user: UserUuid) -> Result<i64, NotificationsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn checkout_leaves_a_notification() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_customer("Ayu").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        ctx.place_order(user, product, 1).await;

        let listed = ctx.notifications.list(user, Page::default()).await?;

        assert_eq!(listed.total, 1);

        let notification = listed.items.first().expect("one notification");

        assert_eq!(notification.kind, "order_status");
        assert_eq!(notification.title, "Order Created");
        assert!(!notification.is_read);

        assert_eq!(ctx.notifications.unread_count(user).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn mark_read_is_owner_scoped() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_customer("Ayu").await;
        let other = ctx.create_customer("Budi").await;
        let product = ctx.create_product("Latte", 25_000, None).await;

        ctx.place_order(owner, product, 1).await;

        let listed = ctx.notifications.list(owner, Page::default()).await?;
        let notification = listed.items.first().expect("one notification");

        let result = ctx.notifications.mark_read(other, notification.uuid).await;

        assert!(
            matches!(result, Err(NotificationsServiceError::NotFound)),
            "expected NotFound for foreign notification, got {result:?}"
        );

        ctx.notifications.mark_read(owner, notification.uuid).await?;

        assert_eq!(ctx.notifications.unread_count(owner).await?, 0);

        Ok(())
    }
}
