use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{
    CreateOrder, CustomerSummary, OrderItemInput, OrderItemView, OrderStatus, OrderView,
    ProductSummary, UpdateOrder,
};
use crate::errors::AppError;
use crate::AppOrderService;

use super::identity::{requester_from_headers, USER_ID_HEADER};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Explicit customer the order is placed for. Only the admin surface
    /// sends this; everyone else gets the customer their account resolves to.
    pub customer_id: Option<Uuid>,
    pub items: Vec<OrderItemRequest>,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub customer_id: Option<Uuid>,
    /// Replacement items; they are re-priced against the current catalog.
    pub items: Option<Vec<OrderItemRequest>>,
    pub status: Option<OrderStatus>,
    pub delivery_address: Option<String>,
    pub delivery_notes: Option<String>,
    pub image: Option<String>,
    pub image_thumbnail: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerSummaryResponse {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummaryResponse {
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummaryResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummaryResponse>,
    pub items: Vec<OrderItemResponse>,
    pub total: String,
    pub status: OrderStatus,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_notes: Option<String>,
    pub image: Option<String>,
    pub image_thumbnail: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CustomerSummary> for CustomerSummaryResponse {
    fn from(c: CustomerSummary) -> Self {
        Self {
            name: c.name,
            email: c.email,
            phone: c.phone,
        }
    }
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(p: ProductSummary) -> Self {
        Self {
            name: p.name,
            price: p.price.to_string(),
            image: p.image,
        }
    }
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(item: OrderItemView) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            product: item.product.map(Into::into),
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            customer: order.customer.map(Into::into),
            items: order.items.into_iter().map(Into::into).collect(),
            total: order.total.to_string(),
            status: order.status,
            delivery_address: order.delivery_address,
            delivery_date: order.delivery_date.map(|d| d.to_rfc3339()),
            delivery_notes: order.delivery_notes,
            image: order.image,
            image_thumbnail: order.image_thumbnail,
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

fn item_inputs(items: Vec<OrderItemRequest>) -> Vec<OrderItemInput> {
    items
        .into_iter()
        .map(|i| OrderItemInput {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order from a cart. Every line is priced with the product's
/// current catalog price; any price sent by the caller is not accepted.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id asserted by the gateway"),
        ("x-user-role" = Option<String>, Header, description = "Requester role, defaults to customer"),
    ),
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Malformed payload or identity headers"),
        (status = 404, description = "Unknown customer profile or product"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppOrderService>,
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let requester = requester_from_headers(&req)?
        .ok_or_else(|| AppError::BadRequest(format!("missing {USER_ID_HEADER} header")))?;
    let body = body.into_inner();

    let order = service
        .create(
            CreateOrder {
                customer_id: body.customer_id,
                items: item_inputs(body.items),
                delivery_address: body.delivery_address,
                delivery_notes: body.delivery_notes,
            },
            requester.user_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Returns every order with its customer reference expanded.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<AppOrderService>) -> Result<HttpResponse, AppError> {
    let orders = service.list().await?;
    let responses: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /orders/{id}
///
/// Applies a partial update. When `items` is present the lines are re-priced
/// against the current catalog and the total is recomputed.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    request_body = UpdateOrderRequest,
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let order = service
        .update(
            path.into_inner(),
            UpdateOrder {
                customer_id: body.customer_id,
                items: body.items.map(item_inputs),
                status: body.status,
                delivery_address: body.delivery_address,
                delivery_notes: body.delivery_notes,
                image: body.image,
                image_thumbnail: body.image_thumbnail,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<AppOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /orders/customer/{customer_id}
///
/// A customer's orders, newest first, with customer and product references
/// expanded. Non-administrators only see the orders of the customer profile
/// their own account resolves to.
#[utoipa::path(
    get,
    path = "/orders/customer/{customer_id}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("x-user-id" = Option<String>, Header, description = "Authenticated user id; absent for internal callers"),
        ("x-user-role" = Option<String>, Header, description = "Requester role, defaults to customer"),
    ),
    responses(
        (status = 200, description = "The customer's orders", body = [OrderResponse]),
        (status = 403, description = "Requester does not own these orders"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_customer_orders(
    service: web::Data<AppOrderService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let requester = requester_from_headers(&req)?;
    let orders = service
        .list_by_customer(path.into_inner(), requester)
        .await?;
    let responses: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(responses))
}
