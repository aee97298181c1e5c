//! Stock lot row model.

use sockstock_core::inventory::StockLot;
use sockstock_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `stock_lots` table.
#[derive(Debug, Clone, FromRow)]
pub struct StockLotRow {
    pub id: DbId,
    pub color: String,
    pub cotton_percentage: i32,
    pub quantity: i32,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<StockLotRow> for StockLot {
    fn from(row: StockLotRow) -> Self {
        StockLot {
            id: row.id,
            color: row.color,
            cotton_percentage: row.cotton_percentage,
            quantity: row.quantity,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
