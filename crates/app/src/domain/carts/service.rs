//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartItemUpdate, CartItemUuid, CartView, NewCartItem},
            repository::PgCartsRepository,
        },
        products::repository::PgProductsRepository,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        let subtotal = items
            .iter()
            .map(|item| item.unit_price.saturating_mul(u64::from(item.quantity)))
            .fold(0_u64, u64::saturating_add);

        Ok(CartView {
            total_items: items.len(),
            subtotal,
            items,
        })
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        if !product.is_available {
            return Err(CartsServiceError::ProductUnavailable);
        }

        let unit_price = self
            .products
            .resolve_unit_price(
                &mut tx,
                &product,
                item.size_variant.as_deref(),
                item.temperature_variant.as_deref(),
            )
            .await?;

        let uuid = self
            .repository
            .upsert_cart_item(&mut tx, user, &item, unit_price)
            .await?;

        let created = self
            .repository
            .get_cart_item(&mut tx, uuid, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItem, CartsServiceError> {
        if update.quantity.is_none() && update.notes.is_none() {
            return Err(CartsServiceError::NoFieldsToUpdate);
        }

        if update.quantity == Some(0) {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_cart_item(&mut tx, item, user, update.quantity, update.notes.as_deref())
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let updated = self
            .repository
            .get_cart_item(&mut tx, item, user)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_cart_item(&mut tx, item, user).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with line and subtotal figures.
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Add an item to the cart, merging duplicate variant selections.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Update quantity and/or notes of an owned cart line.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItem, CartsServiceError>;

    /// Remove an owned cart line.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line in the user's cart.
    async fn clear(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
