//! Process-local adapters, used when no database is configured and in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CatalogEntry, DrinkSize, Order, StoredOrder};
use crate::domain::ports::{DrinkCatalog, OrderRepository, OrderSequence};

pub struct InMemoryOrderSequence {
    last: AtomicI64,
}

impl InMemoryOrderSequence {
    /// The first id handed out is `start + 1`.
    pub fn starting_after(start: i64) -> Self {
        Self {
            last: AtomicI64::new(start),
        }
    }

    pub fn last_issued(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSequence for InMemoryOrderSequence {
    async fn next_id(&self) -> Result<i64, DomainError> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|previous| previous + 1)
            .map_err(|_| DomainError::Sequence("order id space exhausted".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<StoredOrder>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: Order) -> Result<StoredOrder, DomainError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| DomainError::Storage("order store lock poisoned".to_string()))?;
        if orders.iter().any(|stored| stored.order.id == order.id) {
            return Err(DomainError::Storage(format!(
                "order {} already stored",
                order.id
            )));
        }
        let stored = StoredOrder {
            key: Uuid::new_v4(),
            order,
        };
        orders.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<StoredOrder>, DomainError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| DomainError::Storage("order store lock poisoned".to_string()))?;
        let mut listed = orders.clone();
        listed.sort_by_key(|stored| stored.order.id);
        Ok(listed)
    }
}

/// A fixed menu keyed by drink name. One entry per name, like the remote
/// catalog's lookup endpoint.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDrinkCatalog {
    drinks: HashMap<String, CatalogEntry>,
}

impl InMemoryDrinkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drink(mut self, name: &str, size: DrinkSize, unit_price: BigDecimal) -> Self {
        self.drinks.insert(
            name.to_string(),
            CatalogEntry {
                name: name.to_string(),
                size,
                unit_price,
            },
        );
        self
    }
}

#[async_trait]
impl DrinkCatalog for InMemoryDrinkCatalog {
    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogEntry>, DomainError> {
        Ok(self.drinks.get(name).cloned())
    }
}
