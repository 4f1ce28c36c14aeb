use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{NewOrder, OrderPatch, OrderView};

/// A customer profile as returned by the customer-profile collaborator. The
/// profile is a domain record distinct from the authenticated user account.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub image: Option<String>,
}

#[async_trait]
pub trait CustomerLookup: Send + Sync + 'static {
    /// Resolves the customer profile belonging to an authenticated user, or
    /// fails with `NotFound` when the user has none.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<CustomerProfile, DomainError>;
}

#[async_trait]
pub trait ProductLookup: Send + Sync + 'static {
    /// Returns the product's current attributes, or fails with `NotFound`.
    async fn find_one(&self, product_id: Uuid) -> Result<Product, DomainError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    async fn insert(&self, order: NewOrder) -> Result<OrderView, DomainError>;

    /// Every order, customer reference expanded.
    async fn find_all(&self) -> Result<Vec<OrderView>, DomainError>;

    /// One order with its customer expanded, or `None`.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    /// A customer's orders, newest first, with customer and product
    /// references expanded.
    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError>;

    /// Applies a field patch, or returns `None` when no order has this id.
    async fn update(&self, id: Uuid, patch: OrderPatch) -> Result<Option<OrderView>, DomainError>;

    /// Removes an order outright; `false` when no order has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
