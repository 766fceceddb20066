//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    notifications::models::{Notification, NotificationUuid},
    users::models::UserUuid,
};

const INSERT_NOTIFICATION_SQL: &str = include_str!("sql/insert_notification.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const COUNT_NOTIFICATIONS_SQL: &str = include_str!("sql/count_notifications.sql");
const COUNT_UNREAD_SQL: &str = include_str!("sql/count_unread.sql");
const MARK_READ_SQL: &str = include_str!("sql/mark_read.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a notification row as part of a workflow transaction.
    pub(crate) async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        kind: &str,
        title: &str,
        message: &str,
        link: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_NOTIFICATION_SQL)
            .bind(NotificationUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(kind)
            .bind(title)
            .bind(message)
            .bind(link)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        query_as::<Postgres, Notification>(LIST_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_unread(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_UNREAD_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NotificationUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_READ_SQL)
            .bind(notification.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Notification {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            kind: row.try_get("kind")?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            link: row.try_get("link")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
