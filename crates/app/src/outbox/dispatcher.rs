//! Background outbox dispatcher.

use std::{sync::Arc, time::Duration};

use tracing::{error, warn};

use crate::{
    database::Db,
    mailer::Mailer,
    outbox::{
        emails,
        models::{ORDER_COMPLETED, OrderCompletedEmail, OutboxEvent},
        repository::PgOutboxRepository,
    },
};

/// How many pending events one poll handles.
const BATCH_SIZE: i64 = 32;

/// Polls the outbox and delivers pending events through the mailer.
pub struct OutboxDispatcher {
    db: Db,
    mailer: Arc<dyn Mailer>,
    poll_interval: Duration,
    repository: PgOutboxRepository,
}

impl std::fmt::Debug for OutboxDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboxDispatcher")
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl OutboxDispatcher {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>, poll_interval: Duration) -> Self {
        Self {
            db,
            mailer,
            poll_interval,
            repository: PgOutboxRepository::new(),
        }
    }

    /// Run the dispatch loop until the task is dropped.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.poll_interval);

        loop {
            ticker.tick().await;

            if let Err(dispatch_error) = self.drain_once().await {
                error!("outbox dispatch poll failed: {dispatch_error}");
            }
        }
    }

    /// Deliver one batch of pending events. Events whose delivery fails
    /// stay pending and are retried on a later poll.
    pub async fn drain_once(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let events = self.repository.claim_pending(&mut tx, BATCH_SIZE).await?;

        for event in events {
            match self.deliver(&event).await {
                Ok(()) => {
                    self.repository.mark_dispatched(&mut tx, event.uuid).await?;
                }
                Err(delivery_error) => {
                    warn!(
                        "failed to deliver outbox event {} ({}): {delivery_error}",
                        event.uuid, event.kind
                    );
                }
            }
        }

        tx.commit().await?;

        Ok(())
    }

    async fn deliver(&self, event: &OutboxEvent) -> Result<(), String> {
        match event.kind.as_str() {
            ORDER_COMPLETED => {
                let payload: OrderCompletedEmail = serde_json::from_str(&event.payload)
                    .map_err(|parse_error| format!("invalid payload: {parse_error}"))?;

                let (subject, html) = emails::order_completed(&payload);

                self.mailer
                    .send(&payload.to, &subject, &html)
                    .await
                    .map_err(|send_error| send_error.to_string())
            }
            other => {
                // Unknown kinds are dropped rather than retried forever.
                warn!("dropping outbox event of unknown kind {other:?}");

                Ok(())
            }
        }
    }
}
