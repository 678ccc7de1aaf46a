//! Per-item acceptance rules. Nothing in here talks to a collaborator; the
//! catalog answer is handed in by the caller.

use bigdecimal::BigDecimal;

use super::errors::Rejection;
use super::order::{CatalogEntry, LineItem};

#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Accepted { unit_price: BigDecimal },
    Rejected(Rejection),
}

/// Checks the rules that do not need the catalog and returns the trimmed drink
/// name to look up.
pub fn lookup_name(item: &LineItem) -> Result<&str, Rejection> {
    if item.quantity <= 0 {
        return Err(Rejection::NonPositiveQuantity);
    }
    match item.drink_name().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Rejection::MissingDrinkName),
    }
}

/// Decides a single item given what the catalog answered for its name.
pub fn validate(item: &LineItem, answer: Option<&CatalogEntry>) -> ItemOutcome {
    let name = match lookup_name(item) {
        Ok(name) => name,
        Err(rejection) => return ItemOutcome::Rejected(rejection),
    };
    let Some(entry) = answer else {
        return ItemOutcome::Rejected(Rejection::NotInCatalog {
            name: name.to_string(),
        });
    };
    if entry.size != item.size {
        return ItemOutcome::Rejected(Rejection::SizeUnavailable {
            name: entry.name.clone(),
            size: item.size,
        });
    }
    ItemOutcome::Accepted {
        unit_price: entry.unit_price.clone(),
    }
}
