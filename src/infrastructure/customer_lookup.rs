use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerLookup, CustomerProfile};
use crate::schema::customers;

use super::models::CustomerRow;

pub struct DieselCustomerLookup {
    pool: DbPool,
}

impl DieselCustomerLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerLookup for DieselCustomerLookup {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<CustomerProfile, DomainError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<CustomerProfile, DomainError> {
            let mut conn = pool.get()?;

            let row = customers::table
                .filter(customers::user_id.eq(user_id))
                .select(CustomerRow::as_select())
                .first(&mut conn)
                .optional()?
                .ok_or_else(|| DomainError::not_found("customer profile", user_id))?;

            Ok(CustomerProfile {
                id: row.id,
                user_id: row.user_id,
                name: row.name,
                email: row.email,
                phone: row.phone,
            })
        })
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
    }
}
