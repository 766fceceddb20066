//! Returns service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::repository::PgNotificationsRepository,
        numbers,
        orders::{repository::PgOrdersRepository, status::OrderStatus},
        returns::{
            errors::{ReturnsServiceError, is_unique_violation},
            models::{
                CreatedReturn, NewReturn, Return, ReturnDecision, ReturnDetails, ReturnStatus,
                ReturnUuid,
            },
            repository::PgReturnsRepository,
        },
        users::models::UserUuid,
    },
    pagination::{Page, PagedResult},
};

/// Attempts before giving up on a return-number collision.
const NUMBER_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct PgReturnsService {
    db: Db,
    repository: PgReturnsRepository,
    orders: PgOrdersRepository,
    notifications: PgNotificationsRepository,
}

impl PgReturnsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReturnsRepository::new(),
            orders: PgOrdersRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    async fn try_create_return(
        &self,
        user: UserUuid,
        request: &NewReturn,
    ) -> Result<CreatedReturn, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .get_order_owned(&mut tx, request.order_uuid, user)
            .await?
            .ok_or(ReturnsServiceError::OrderNotFound)?;

        if order.status != OrderStatus::Completed {
            return Err(ReturnsServiceError::OrderNotCompleted);
        }

        if self
            .repository
            .return_exists_for_order(&mut tx, request.order_uuid)
            .await?
        {
            return Err(ReturnsServiceError::AlreadyExists);
        }

        let return_number = numbers::generate(numbers::RETURN_PREFIX);
        let uuid = ReturnUuid::new();

        self.repository
            .insert_return(
                &mut tx,
                uuid,
                request.order_uuid,
                user,
                &return_number,
                &request.reason,
                &request.description,
                &request.images,
            )
            .await?;

        if request.items.is_empty() {
            self.repository
                .snapshot_all_items(&mut tx, uuid, request.order_uuid)
                .await?;
        } else {
            for item in &request.items {
                let rows_affected = self
                    .repository
                    .snapshot_item(&mut tx, uuid, *item, request.order_uuid)
                    .await?;

                if rows_affected == 0 {
                    return Err(ReturnsServiceError::ItemNotFound);
                }
            }
        }

        self.notifications
            .insert(
                &mut tx,
                user,
                "return",
                "Return Request Created",
                &format!("Your return request {return_number} has been submitted"),
                Some(&format!("/returns/{uuid}")),
            )
            .await?;

        tx.commit().await?;

        Ok(CreatedReturn {
            uuid,
            return_number,
        })
    }
}

#[async_trait]
impl ReturnsService for PgReturnsService {
    async fn create_return(
        &self,
        user: UserUuid,
        request: NewReturn,
    ) -> Result<CreatedReturn, ReturnsServiceError> {
        if request.images.is_empty() {
            return Err(ReturnsServiceError::EvidenceRequired);
        }

        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.try_create_return(user, &request).await {
                Err(error)
                    if is_unique_violation(&error, "returns_return_number_key")
                        && attempt < NUMBER_ATTEMPTS =>
                {
                    continue;
                }
                result => return result,
            }
        }
    }

    async fn get_return(
        &self,
        retrn: ReturnUuid,
        owner: Option<UserUuid>,
    ) -> Result<ReturnDetails, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = match owner {
            Some(user) => self.repository.get_return_owned(&mut tx, retrn, user).await?,
            None => self.repository.get_return(&mut tx, retrn).await?,
        }
        .ok_or(ReturnsServiceError::NotFound)?;

        let items = self.repository.list_return_items(&mut tx, retrn).await?;

        tx.commit().await?;

        Ok(ReturnDetails {
            retrn: found,
            items,
        })
    }

    async fn list_user_returns(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<PagedResult<Return>, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_user_returns(&mut tx, user).await?;

        let returns = self
            .repository
            .list_user_returns(&mut tx, user, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(PagedResult {
            items: returns,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn list_returns(
        &self,
        status: Option<ReturnStatus>,
        page: Page,
    ) -> Result<PagedResult<Return>, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_returns(&mut tx, status).await?;

        let returns = self
            .repository
            .list_returns(&mut tx, status, page.limit(), page.offset())
            .await?;

        tx.commit().await?;

        Ok(PagedResult {
            items: returns,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn process_return(
        &self,
        retrn: ReturnUuid,
        actor: UserUuid,
        decision: ReturnDecision,
    ) -> Result<(), ReturnsServiceError> {
        // Pending is not a staff decision; the three target states are
        // reachable from any prior state, as in the original workflow.
        if decision.status == ReturnStatus::Pending {
            return Err(ReturnsServiceError::InvalidStatus);
        }

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_return(&mut tx, retrn)
            .await?
            .ok_or(ReturnsServiceError::NotFound)?;

        self.repository
            .process_return(&mut tx, retrn, &decision, actor)
            .await?;

        self.notifications
            .insert(
                &mut tx,
                current.user_uuid,
                "return",
                "Return Update",
                &format!(
                    "Your return request {} has been {}",
                    current.return_number, decision.status
                ),
                Some(&format!("/returns/{retrn}")),
            )
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReturnsService: Send + Sync {
    /// Create a return request for a completed, owned order.
    async fn create_return(
        &self,
        user: UserUuid,
        request: NewReturn,
    ) -> Result<CreatedReturn, ReturnsServiceError>;

    /// Retrieve a return with item snapshots, optionally owner-scoped.
    async fn get_return(
        &self,
        retrn: ReturnUuid,
        owner: Option<UserUuid>,
    ) -> Result<ReturnDetails, ReturnsServiceError>;

    /// List the user's returns, newest first.
    async fn list_user_returns(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<PagedResult<Return>, ReturnsServiceError>;

    /// List all returns, optionally filtered by status (staff view).
    async fn list_returns(
        &self,
        status: Option<ReturnStatus>,
        page: Page,
    ) -> Result<PagedResult<Return>, ReturnsServiceError>;

    /// Apply a staff decision to a return.
    async fn process_return(
        &self,
        retrn: ReturnUuid,
        actor: UserUuid,
        decision: ReturnDecision,
    ) -> Result<(), ReturnsServiceError>;
}
