use thiserror::Error;

use super::order::{DrinkSize, OrderStatus};

/// Why an order was turned down. Every variant is a client fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("order must contain at least one item")]
    EmptyOrder,
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("drink name is required")]
    MissingDrinkName,
    #[error("drink not available in catalog: {name}")]
    NotInCatalog { name: String },
    #[error("drink '{name}' not available in size '{size}'")]
    SizeUnavailable { name: String, size: DrinkSize },
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("drink catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("order id allocation failed: {0}")]
    Sequence(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("order processing failed: {context}")]
    Processing {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl DomainError {
    pub fn processing(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        DomainError::Processing {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Terminal status of the order this error ended.
    pub fn status(&self) -> OrderStatus {
        match self {
            DomainError::Rejected(_) => OrderStatus::Rejected,
            _ => OrderStatus::Error,
        }
    }

    /// True for failures of a collaborator (catalog, sequence, store).
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            DomainError::CatalogUnavailable(_)
                | DomainError::Sequence(_)
                | DomainError::Storage(_)
        )
    }
}
