//! PostgreSQL-backed [`StockStore`].

use async_trait::async_trait;
use sockstock_core::error::CoreError;
use sockstock_core::inventory::{Comparison, StockLot, StockLotValues, StockStore};
use sockstock_core::types::DbId;

use crate::repositories::StockLotRepo;
use crate::DbPool;

/// Message returned when an optimistic version check loses.
pub const STALE_VERSION_MESSAGE: &str =
    "Conflict detected: another transaction updated the data.";

/// [`StockStore`] over the `stock_lots` table.
#[derive(Clone)]
pub struct PgStockStore {
    pool: DbPool,
}

impl PgStockStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn find_by_key(
        &self,
        color: &str,
        cotton_percentage: i32,
    ) -> Result<Option<StockLot>, CoreError> {
        let row = StockLotRepo::find_by_key(&self.pool, color, cotton_percentage)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(StockLot::from))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<StockLot>, CoreError> {
        let row = StockLotRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(StockLot::from))
    }

    async fn insert(&self, values: &StockLotValues) -> Result<StockLot, CoreError> {
        let row = StockLotRepo::create(&self.pool, values)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        expected_version: i32,
        values: &StockLotValues,
    ) -> Result<StockLot, CoreError> {
        StockLotRepo::update_if_version(&self.pool, id, expected_version, values)
            .await
            .map_err(classify_sqlx_error)?
            .map(StockLot::from)
            .ok_or_else(|| CoreError::Conflict(STALE_VERSION_MESSAGE.to_string()))
    }

    async fn count(
        &self,
        color: &str,
        comparison: Comparison,
        cotton_percentage: i32,
    ) -> Result<i64, CoreError> {
        StockLotRepo::count(&self.pool, color, comparison, cotton_percentage)
            .await
            .map_err(classify_sqlx_error)
    }
}

/// Map a sqlx error onto the domain taxonomy.
///
/// - Unique constraint violations (code `23505`, constraint name starting
///   with `uq_`) become `Conflict`.
/// - Everything else becomes `Internal` and is logged here.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "A stock lot with this color and cotton percentage already exists ({constraint})"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("Database error: {err}"))
}
