use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{Product, ProductLookup};
use crate::schema::products;

use super::models::ProductRow;

pub struct DieselProductLookup {
    pool: DbPool,
}

impl DieselProductLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductLookup for DieselProductLookup {
    async fn find_one(&self, product_id: Uuid) -> Result<Product, DomainError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<Product, DomainError> {
            let mut conn = pool.get()?;

            let row = products::table
                .find(product_id)
                .select(ProductRow::as_select())
                .first(&mut conn)
                .optional()?
                .ok_or_else(|| DomainError::not_found("product", product_id))?;

            Ok(Product {
                id: row.id,
                name: row.name,
                price: row.price,
                image: row.image,
            })
        })
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
    }
}
