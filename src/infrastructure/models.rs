use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine, StoredOrder};
use crate::schema::{order_items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub order_number: i64,
    pub total_price: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub position: i32,
    pub drink_name: String,
    pub size: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl OrderRow {
    pub fn from_order(key: Uuid, order: &Order) -> Self {
        Self {
            id: key,
            order_number: order.id,
            total_price: order.total_price.clone(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
        }
    }
}

impl OrderItemRow {
    pub fn from_line(order_key: Uuid, position: usize, line: &OrderLine) -> Result<Self, DomainError> {
        let position = i32::try_from(position)
            .map_err(|e| DomainError::processing("numbering order items", e))?;
        Ok(Self {
            id: Uuid::new_v4(),
            order_id: order_key,
            position,
            drink_name: line.drink_name.clone(),
            size: line.size.as_str().to_string(),
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
        })
    }

    fn into_line(self) -> Result<OrderLine, DomainError> {
        Ok(OrderLine {
            size: self
                .size
                .parse()
                .map_err(|e: String| DomainError::processing("decoding stored order item", e))?,
            drink_name: self.drink_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        })
    }
}

/// Rebuilds a stored order from its row and its item rows, items in position
/// order.
pub fn to_stored_order(row: OrderRow, mut items: Vec<OrderItemRow>) -> Result<StoredOrder, DomainError> {
    items.sort_by_key(|item| item.position);
    let status = row
        .status
        .parse()
        .map_err(|e: String| DomainError::processing("decoding stored order", e))?;
    Ok(StoredOrder {
        key: row.id,
        order: Order {
            id: row.order_number,
            items: items
                .into_iter()
                .map(OrderItemRow::into_line)
                .collect::<Result<_, _>>()?,
            total_price: row.total_price,
            created_at: row.created_at,
            status,
        },
    })
}
