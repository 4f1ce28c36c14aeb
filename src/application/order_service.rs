use bigdecimal::BigDecimal;
use futures::future::try_join_all;
use uuid::Uuid;

use crate::domain::auth::Requester;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    CreateOrder, NewOrder, OrderItemInput, OrderPatch, OrderStatus, OrderView, PricedOrderItem,
    UpdateOrder,
};
use crate::domain::ports::{CustomerLookup, OrderStore, ProductLookup};

pub struct OrderService<C, P, S> {
    customers: C,
    products: P,
    store: S,
}

impl<C, P, S> OrderService<C, P, S>
where
    C: CustomerLookup,
    P: ProductLookup,
    S: OrderStore,
{
    pub fn new(customers: C, products: P, store: S) -> Self {
        Self {
            customers,
            products,
            store,
        }
    }

    /// Creates an order, pricing every line against the current catalog.
    ///
    /// An explicit `customer_id` in the input is taken verbatim; the calling
    /// boundary is trusted to only let administrators send one. Otherwise the
    /// order belongs to the customer profile of the requesting user.
    pub async fn create(
        &self,
        input: CreateOrder,
        requesting_user_id: Uuid,
    ) -> Result<OrderView, DomainError> {
        let customer_id = match input.customer_id {
            Some(id) => id,
            None => {
                self.customers
                    .find_by_user_id(requesting_user_id)
                    .await?
                    .id
            }
        };

        let items = self.price_items(&input.items).await?;
        let total = order_total(&items);

        self.store
            .insert(NewOrder {
                customer_id,
                items,
                total,
                status: OrderStatus::Pending,
                delivery_address: input.delivery_address,
                delivery_notes: input.delivery_notes,
            })
            .await
    }

    pub async fn list(&self) -> Result<Vec<OrderView>, DomainError> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    /// Applies a partial patch. Items in a patch go through the same pricing
    /// as creation, so the stored total always matches the stored lines.
    pub async fn update(&self, id: Uuid, patch: UpdateOrder) -> Result<OrderView, DomainError> {
        let (items, total) = match &patch.items {
            Some(items) => {
                let priced = self.price_items(items).await?;
                let total = order_total(&priced);
                (Some(priced), Some(total))
            }
            None => (None, None),
        };

        self.store
            .update(
                id,
                OrderPatch {
                    customer_id: patch.customer_id,
                    items,
                    total,
                    status: patch.status,
                    delivery_address: patch.delivery_address,
                    delivery_notes: patch.delivery_notes,
                    image: patch.image,
                    image_thumbnail: patch.image_thumbnail,
                },
            )
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("order", id))
        }
    }

    /// Lists a customer's orders, newest first.
    pub async fn list_by_customer(
        &self,
        customer_id: Uuid,
        requester: Option<Requester>,
    ) -> Result<Vec<OrderView>, DomainError> {
        self.ensure_customer_access(customer_id, requester).await?;
        self.store.find_by_customer(customer_id).await
    }

    /// The one ownership rule: a requester without the bypass sees only the
    /// orders of the customer profile their own account resolves to. A
    /// requester with no profile at all is equally forbidden.
    async fn ensure_customer_access(
        &self,
        customer_id: Uuid,
        requester: Option<Requester>,
    ) -> Result<(), DomainError> {
        let Some(requester) = requester else {
            return Ok(());
        };
        if requester.bypasses_ownership_check() {
            return Ok(());
        }

        let profile = self
            .customers
            .find_by_user_id(requester.user_id)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => DomainError::Forbidden,
                other => other,
            })?;
        if profile.id != customer_id {
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }

    /// Resolves every line's product concurrently and captures its current
    /// price. Any unknown product aborts the whole batch before anything is
    /// written.
    async fn price_items(
        &self,
        items: &[OrderItemInput],
    ) -> Result<Vec<PricedOrderItem>, DomainError> {
        if items.is_empty() {
            return Err(DomainError::InvalidInput(
                "an order needs at least one item".to_string(),
            ));
        }
        if let Some(item) = items.iter().find(|i| i.quantity <= 0) {
            return Err(DomainError::InvalidInput(format!(
                "invalid quantity {} for product {}",
                item.quantity, item.product_id
            )));
        }

        try_join_all(items.iter().map(|item| self.price_item(item))).await
    }

    async fn price_item(&self, item: &OrderItemInput) -> Result<PricedOrderItem, DomainError> {
        let product = self.products.find_one(item.product_id).await?;
        Ok(PricedOrderItem {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: product.price,
        })
    }
}

fn order_total(items: &[PricedOrderItem]) -> BigDecimal {
    items.iter().fold(BigDecimal::from(0), |sum, item| {
        sum + &item.unit_price * BigDecimal::from(item.quantity)
    })
}
