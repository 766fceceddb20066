//! Loyalty service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        loyalty::{
            errors::LoyaltyServiceError, models::LoyaltySummary, repository::PgLoyaltyRepository,
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgLoyaltyService {
    db: Db,
    repository: PgLoyaltyRepository,
    users: PgUsersRepository,
}

impl PgLoyaltyService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgLoyaltyRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl LoyaltyService for PgLoyaltyService {
    async fn summary(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<LoyaltySummary, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let balance = self.users.loyalty_points(&mut tx, user).await?;

        let total = self.repository.count_transactions(&mut tx, user).await?;

        let transactions = self
            .repository
            .list_transactions(&mut tx, user, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(LoyaltySummary {
            balance,
            transactions,
            total_transactions: u64::try_from(total).unwrap_or(0),
        })
    }
}

#[automock]
#[async_trait]
pub trait LoyaltyService: Send + Sync {
    /// Current balance plus a page of ledger history, newest first.
    async fn summary(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<LoyaltySummary, LoyaltyServiceError>;
}
