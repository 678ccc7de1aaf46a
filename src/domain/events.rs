use bigdecimal::BigDecimal;

use super::errors::{DomainError, Rejection};
use super::order::Order;

/// Lifecycle hooks fired by the order service while it assembles an order.
pub trait OrderEvents: Send + Sync + 'static {
    fn received(&self, item_count: usize);
    fn validated(&self, total_price: &BigDecimal);
    fn rejected(&self, rejection: &Rejection);
    fn confirmed(&self, order: &Order);
    fn errored(&self, error: &DomainError);
}

/// Writes every lifecycle point to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOrderEvents;

impl OrderEvents for LogOrderEvents {
    fn received(&self, item_count: usize) {
        log::info!("order received with {} item(s)", item_count);
    }

    fn validated(&self, total_price: &BigDecimal) {
        log::info!("order validated, total price {}", total_price);
    }

    fn rejected(&self, rejection: &Rejection) {
        log::warn!("order rejected: {}", rejection);
    }

    fn confirmed(&self, order: &Order) {
        log::info!(
            "order {} confirmed, {} item(s), total {}",
            order.id,
            order.items.len(),
            order.total_price
        );
    }

    fn errored(&self, error: &DomainError) {
        log::error!("order ended in {}: {}", error.status().as_str(), error);
    }
}
