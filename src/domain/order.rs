use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

/// Lifecycle states an order can be in.
///
/// Stored lowercase. No transition graph is enforced at this layer; whatever
/// workflow drives status changes owns that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Confirmed,
    Preparing,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

// ── Inputs ───────────────────────────────────────────────────────────────────

/// One line of a creation or update payload. Callers never supply a price;
/// every line is priced against the catalog when the order is written.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// Explicit owner of the order. Only trusted callers (the admin surface)
    /// send this; when absent the order belongs to the requesting user's own
    /// customer profile.
    pub customer_id: Option<Uuid>,
    pub items: Vec<OrderItemInput>,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrder {
    pub customer_id: Option<Uuid>,
    pub items: Option<Vec<OrderItemInput>>,
    pub status: Option<OrderStatus>,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
    pub image: Option<String>,
    pub image_thumbnail: Option<String>,
}

/// A line with its price captured from the catalog. The captured price never
/// changes afterwards, even when the product's price does.
#[derive(Debug, Clone)]
pub struct PricedOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// A fully priced order ready to be written.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub items: Vec<PricedOrderItem>,
    pub total: BigDecimal,
    pub status: OrderStatus,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
}

/// Store-facing field patch. Item changes always arrive re-priced together
/// with the matching total.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub customer_id: Option<Uuid>,
    pub items: Option<Vec<PricedOrderItem>>,
    pub total: Option<BigDecimal>,
    pub status: Option<OrderStatus>,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
    pub image: Option<String>,
    pub image_thumbnail: Option<String>,
}

// ── Views ────────────────────────────────────────────────────────────────────

/// Read-only projection of the referenced customer, attached to views without
/// ever replacing the stored reference.
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub name: String,
    pub price: BigDecimal,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer: Option<CustomerSummary>,
    pub items: Vec<OrderItemView>,
    pub total: BigDecimal,
    pub status: OrderStatus,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_notes: Option<String>,
    pub image: Option<String>,
    pub image_thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
