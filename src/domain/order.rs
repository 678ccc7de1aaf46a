use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkSize {
    Small,
    Medium,
    Large,
}

impl DrinkSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrinkSize::Small => "small",
            DrinkSize::Medium => "medium",
            DrinkSize::Large => "large",
        }
    }
}

impl fmt::Display for DrinkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrinkSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(DrinkSize::Small),
            "medium" => Ok(DrinkSize::Medium),
            "large" => Ok(DrinkSize::Large),
            other => Err(format!("unknown drink size '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Confirmed,
    Rejected,
    Error,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Error => "ERROR",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "REJECTED" => Ok(OrderStatus::Rejected),
            "ERROR" => Ok(OrderStatus::Error),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// A reference to a catalog drink embedded in a line item by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRef {
    pub name: String,
}

/// One requested drink as submitted. Nothing here has been checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_name: Option<String>,
    pub drink: Option<CatalogRef>,
    pub size: DrinkSize,
    pub quantity: i32,
}

impl LineItem {
    pub fn named(name: &str, size: DrinkSize, quantity: i32) -> Self {
        Self {
            product_name: Some(name.to_string()),
            drink: None,
            size,
            quantity,
        }
    }

    /// The name used for the catalog lookup: an attached catalog reference wins
    /// over the plain product name.
    pub fn drink_name(&self) -> Option<&str> {
        match &self.drink {
            Some(drink) => Some(drink.name.as_str()),
            None => self.product_name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub items: Vec<LineItem>,
}

/// What the catalog knows about a drink.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub size: DrinkSize,
    pub unit_price: BigDecimal,
}

/// A line item that passed validation, priced from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub drink_name: String,
    pub size: DrinkSize,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// Number of fractional digits a price was quoted with ("3.50" has two).
fn price_scale(price: &BigDecimal) -> i64 {
    price.as_bigint_and_exponent().1.max(0)
}

impl OrderLine {
    /// `unit_price × quantity`, quoted with as many decimals as the unit price.
    pub fn subtotal(&self) -> BigDecimal {
        (&self.unit_price * &BigDecimal::from(self.quantity))
            .with_scale(price_scale(&self.unit_price))
    }
}

/// Sum of all subtotals, quoted with the widest scale among the unit prices.
pub fn total_price(lines: &[OrderLine]) -> BigDecimal {
    let scale = lines
        .iter()
        .map(|line| price_scale(&line.unit_price))
        .max()
        .unwrap_or(0);
    lines
        .iter()
        .map(OrderLine::subtotal)
        .sum::<BigDecimal>()
        .with_scale(scale)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub items: Vec<OrderLine>,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// An order as held by the store, together with the store's own key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub key: Uuid,
    pub order: Order,
}
