use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{
    CatalogRef, DrinkSize, LineItem, Order, OrderLine, OrderRequest, OrderStatus,
};
use crate::errors::{AppError, ErrorResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

/// A catalog drink the client already picked from the menu. Only the name is
/// used; any other menu fields sent along are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DrinkRefRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    /// Plain drink name, used when no `drink` reference is attached.
    #[serde(default, alias = "product_name")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub drink: Option<DrinkRefRequest>,
    #[schema(value_type = String, example = "medium")]
    pub size: DrinkSize,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<CreateOrderItemRequest>,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(body: CreateOrderRequest) -> Self {
        OrderRequest {
            items: body
                .items
                .into_iter()
                .map(|item| LineItem {
                    product_name: item.product_name,
                    drink: item.drink.map(|d| CatalogRef { name: d.name }),
                    size: item.size,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub drink_name: String,
    #[schema(value_type = String, example = "medium")]
    pub size: DrinkSize,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "3.50"
    #[schema(value_type = String, example = "3.50")]
    pub unit_price: BigDecimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub items: Vec<OrderItemResponse>,
    #[schema(value_type = String, example = "7.00")]
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "CONFIRMED")]
    pub status: OrderStatus,
}

impl From<OrderLine> for OrderItemResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            drink_name: line.drink_name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            items: order.items.into_iter().map(Into::into).collect(),
            total_price: order.total_price,
            created_at: order.created_at,
            status: order.status,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates each item against the drink catalog, in order, and confirms the
/// order only if every item is available in the requested size. The first
/// offending item's reason is returned as a 400; nothing is stored and no
/// order number is used up.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order confirmed", body = OrderResponse),
        (status = 400, description = "Order rejected", body = ErrorResponse),
        (status = 503, description = "Catalog or storage unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service.create_order(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Returns every stored order with its items, ascending by order number.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All stored orders", body = [OrderResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = service
        .list_orders()
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_keeps_item_order_and_both_names() {
        let body: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "items": [
                { "drink": { "id": 1, "name": "Latte", "size": "medium", "price": 3.5 },
                  "size": "medium", "quantity": 1 },
                { "productName": "Mocha", "size": "large", "quantity": 2 }
            ]
        }))
        .unwrap();

        let request = OrderRequest::from(body);

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].drink_name(), Some("Latte"));
        assert_eq!(request.items[1].drink_name(), Some("Mocha"));
        assert_eq!(request.items[1].size, DrinkSize::Large);
    }

    #[test]
    fn snake_case_product_name_is_still_read() {
        let item: CreateOrderItemRequest = serde_json::from_str(
            r#"{"product_name":"Latte","size":"medium","quantity":1}"#,
        )
        .unwrap();
        assert_eq!(item.product_name.as_deref(), Some("Latte"));
    }

    #[test]
    fn response_fields_are_camel_case() {
        let order = Order {
            id: 1001,
            items: vec![OrderLine {
                drink_name: "Latte".to_string(),
                size: DrinkSize::Medium,
                quantity: 2,
                unit_price: "3.50".parse().unwrap(),
            }],
            total_price: "7.00".parse().unwrap(),
            created_at: Utc::now(),
            status: OrderStatus::Confirmed,
        };

        let json = serde_json::to_value(OrderResponse::from(order)).unwrap();

        assert_eq!(json["totalPrice"], "7.00");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["items"][0]["drinkName"], "Latte");
        assert_eq!(json["items"][0]["unitPrice"], "3.50");
        assert!(json.get("total_price").is_none());
    }

    #[test]
    fn missing_items_means_empty_order() {
        let body: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }

    #[test]
    fn unknown_size_does_not_parse() {
        let parsed: Result<CreateOrderItemRequest, _> =
            serde_json::from_str(r#"{"productName":"Latte","size":"venti","quantity":1}"#);
        assert!(parsed.is_err());
    }
}
