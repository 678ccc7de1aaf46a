use async_trait::async_trait;

use super::errors::DomainError;
use super::order::{CatalogEntry, Order, StoredOrder};

#[async_trait]
pub trait DrinkCatalog: Send + Sync + 'static {
    /// `Ok(None)` means the catalog answered and does not know the drink.
    async fn find_by_name(&self, name: &str) -> Result<Option<CatalogEntry>, DomainError>;
}

#[async_trait]
pub trait OrderSequence: Send + Sync + 'static {
    /// Every call returns a value no other call has returned, and greater than
    /// any value returned before it.
    async fn next_id(&self) -> Result<i64, DomainError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn insert(&self, order: Order) -> Result<StoredOrder, DomainError>;
    /// Ascending by business id.
    async fn list_all(&self) -> Result<Vec<StoredOrder>, DomainError>;
}
