use std::sync::Arc;

use chrono::Utc;

use crate::domain::errors::{DomainError, Rejection};
use crate::domain::events::{LogOrderEvents, OrderEvents};
use crate::domain::order::{total_price, Order, OrderLine, OrderRequest, OrderStatus};
use crate::domain::ports::{DrinkCatalog, OrderRepository, OrderSequence};
use crate::domain::validator::{self, ItemOutcome};

pub struct OrderService {
    catalog: Arc<dyn DrinkCatalog>,
    sequence: Arc<dyn OrderSequence>,
    repo: Arc<dyn OrderRepository>,
    events: Arc<dyn OrderEvents>,
}

impl OrderService {
    pub fn new(
        catalog: Arc<dyn DrinkCatalog>,
        sequence: Arc<dyn OrderSequence>,
        repo: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            catalog,
            sequence,
            repo,
            events: Arc::new(LogOrderEvents),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn OrderEvents>) -> Self {
        self.events = events;
        self
    }

    /// Validates every item against the catalog, prices the order, gives it a
    /// fresh id and stores it.
    ///
    /// A rejected order never consumes an id and is never stored. The returned
    /// error's [`DomainError::status`] is the order's terminal status.
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, DomainError> {
        self.events.received(request.items.len());

        let result = self.assemble(request).await;
        match &result {
            Ok(order) => self.events.confirmed(order),
            Err(DomainError::Rejected(rejection)) => self.events.rejected(rejection),
            Err(e) => self.events.errored(e),
        }
        result
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        let stored = self.repo.list_all().await?;
        Ok(stored.into_iter().map(|s| s.order).collect())
    }

    async fn assemble(&self, request: OrderRequest) -> Result<Order, DomainError> {
        if request.items.is_empty() {
            return Err(Rejection::EmptyOrder.into());
        }

        let lines = self.price_items(request).await?;
        let total_price = total_price(&lines);
        self.events.validated(&total_price);

        let id = self.sequence.next_id().await?;
        let order = Order {
            id,
            items: lines,
            total_price,
            created_at: Utc::now(),
            status: OrderStatus::Confirmed,
        };

        let stored = self.repo.insert(order).await?;
        Ok(stored.order)
    }

    // Items are checked one at a time, in submission order; the first
    // rejection stops the whole order.
    async fn price_items(&self, request: OrderRequest) -> Result<Vec<OrderLine>, DomainError> {
        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let name = validator::lookup_name(item)?;
            let answer = self.catalog.find_by_name(name).await?;

            match validator::validate(item, answer.as_ref()) {
                ItemOutcome::Accepted { unit_price } => lines.push(OrderLine {
                    drink_name: answer.map(|entry| entry.name).unwrap_or_else(|| name.to_string()),
                    size: item.size,
                    quantity: item.quantity,
                    unit_price,
                }),
                ItemOutcome::Rejected(rejection) => return Err(rejection.into()),
            }
        }
        Ok(lines)
    }
}
