use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::OrderSequence;
use crate::schema::order_sequences;

use super::order_repo::blocking;

/// A named counter row in `order_sequences`, bumped with a single upsert so
/// two callers can never read the same previous value.
pub struct DieselOrderSequence {
    pool: DbPool,
    name: String,
    seed: i64,
}

impl DieselOrderSequence {
    /// `seed` only matters when the counter row does not exist yet; the first
    /// id it hands out is then `seed + 1`.
    pub fn new(pool: DbPool, name: impl Into<String>, seed: i64) -> Self {
        Self {
            pool,
            name: name.into(),
            seed,
        }
    }
}

#[async_trait]
impl OrderSequence for DieselOrderSequence {
    async fn next_id(&self) -> Result<i64, DomainError> {
        let name = self.name.clone();
        let first = self
            .seed
            .checked_add(1)
            .ok_or_else(|| DomainError::Sequence("order id seed out of range".to_string()))?;

        blocking(&self.pool, move |conn| {
            diesel::insert_into(order_sequences::table)
                .values((
                    order_sequences::name.eq(&name),
                    order_sequences::seq.eq(first),
                ))
                .on_conflict(order_sequences::name)
                .do_update()
                .set(order_sequences::seq.eq(order_sequences::seq + 1_i64))
                .returning(order_sequences::seq)
                .get_result::<i64>(conn)
                .map_err(|e| DomainError::Sequence(format!("counter '{}': {}", name, e)))
        })
        .await
    }
}
