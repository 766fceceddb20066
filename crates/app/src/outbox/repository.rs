//! Outbox Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::outbox::models::{OutboxEvent, OutboxEventUuid};

const ENQUEUE_EVENT_SQL: &str = include_str!("sql/enqueue_event.sql");
const CLAIM_PENDING_SQL: &str = include_str!("sql/claim_pending.sql");
const MARK_DISPATCHED_SQL: &str = include_str!("sql/mark_dispatched.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOutboxRepository;

impl PgOutboxRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn enqueue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: &str,
        payload: &str,
    ) -> Result<(), sqlx::Error> {
        query(ENQUEUE_EVENT_SQL)
            .bind(OutboxEventUuid::new().into_uuid())
            .bind(kind)
            .bind(payload)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Lock a batch of undispatched events for this transaction. Rows
    /// locked by a concurrent dispatcher are skipped.
    pub(crate) async fn claim_pending(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        query_as::<Postgres, OutboxEvent>(CLAIM_PENDING_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_dispatched(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: OutboxEventUuid,
    ) -> Result<(), sqlx::Error> {
        query(MARK_DISPATCHED_SQL)
            .bind(event.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OutboxEvent {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OutboxEventUuid::from_uuid(row.try_get("uuid")?),
            kind: row.try_get("kind")?,
            payload: row.try_get("payload")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            dispatched_at: row
                .try_get::<Option<SqlxTimestamp>, _>("dispatched_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
