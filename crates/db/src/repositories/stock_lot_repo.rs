//! Repository for the `stock_lots` table.

use sockstock_core::inventory::{Comparison, StockLotValues};
use sockstock_core::types::DbId;
use sqlx::PgPool;

use crate::models::stock_lot::StockLotRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, color, cotton_percentage, quantity, version, created_at, updated_at";

/// Provides queries over stock lots.
pub struct StockLotRepo;

impl StockLotRepo {
    /// Find a lot by its `(color, cotton_percentage)` business key.
    pub async fn find_by_key(
        pool: &PgPool,
        color: &str,
        cotton_percentage: i32,
    ) -> Result<Option<StockLotRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stock_lots WHERE color = $1 AND cotton_percentage = $2"
        );
        sqlx::query_as::<_, StockLotRow>(&query)
            .bind(color)
            .bind(cotton_percentage)
            .fetch_optional(pool)
            .await
    }

    /// Find a lot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StockLotRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stock_lots WHERE id = $1");
        sqlx::query_as::<_, StockLotRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new lot at version 0, returning the created row.
    ///
    /// Fails with a unique violation on `uq_stock_lots_color_cotton` if the
    /// key is already taken.
    pub async fn create(pool: &PgPool, input: &StockLotValues) -> Result<StockLotRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_lots (color, cotton_percentage, quantity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockLotRow>(&query)
            .bind(&input.color)
            .bind(input.cotton_percentage)
            .bind(input.quantity)
            .fetch_one(pool)
            .await
    }

    /// Overwrite a lot if its version still equals `expected_version`.
    ///
    /// Compare and increment happen in one statement. Returns `None` when the
    /// version has moved on.
    pub async fn update_if_version(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        input: &StockLotValues,
    ) -> Result<Option<StockLotRow>, sqlx::Error> {
        let query = format!(
            "UPDATE stock_lots SET
                color = $3,
                cotton_percentage = $4,
                quantity = $5,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockLotRow>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&input.color)
            .bind(input.cotton_percentage)
            .bind(input.quantity)
            .fetch_optional(pool)
            .await
    }

    /// Count lots of `color` whose cotton percentage satisfies `comparison`.
    pub async fn count(
        pool: &PgPool,
        color: &str,
        comparison: Comparison,
        cotton_percentage: i32,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM stock_lots WHERE color = $1 AND cotton_percentage {} $2",
            sql_operator(comparison)
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(color)
            .bind(cotton_percentage)
            .fetch_one(pool)
            .await
    }
}

fn sql_operator(comparison: Comparison) -> &'static str {
    match comparison {
        Comparison::MoreThan => ">",
        Comparison::LessThan => "<",
        Comparison::Equal => "=",
    }
}
