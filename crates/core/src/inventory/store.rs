//! Persistence seam for stock lots.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::inventory::model::{Comparison, StockLot, StockLotValues};
use crate::types::DbId;

/// Durable storage of stock lots with optimistic-concurrency writes.
///
/// Implementations map a lost version race (or a concurrent insert of the
/// same `(color, cotton_percentage)` pair) to [`CoreError::Conflict`] and any
/// storage failure to [`CoreError::Internal`].
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Look up a lot by its business key.
    async fn find_by_key(
        &self,
        color: &str,
        cotton_percentage: i32,
    ) -> Result<Option<StockLot>, CoreError>;

    /// Look up a lot by its surrogate id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<StockLot>, CoreError>;

    /// Insert a new lot at version 0.
    async fn insert(&self, values: &StockLotValues) -> Result<StockLot, CoreError>;

    /// Overwrite a lot's columns if its stored version still equals
    /// `expected_version`, bumping the version by one.
    async fn update(
        &self,
        id: DbId,
        expected_version: i32,
        values: &StockLotValues,
    ) -> Result<StockLot, CoreError>;

    /// Number of lots of `color` whose cotton percentage satisfies
    /// `comparison` against `cotton_percentage`.
    async fn count(
        &self,
        color: &str,
        comparison: Comparison,
        cotton_percentage: i32,
    ) -> Result<i64, CoreError>;
}
