//! Sock stock inventory: lots, movements, and the operations over them.
//!
//! [`InventoryService`] owns a [`StockStore`] handle passed in at
//! construction. Every operation re-reads the lot it touches and writes it
//! back with the version it read, so two racing writers on one lot cannot
//! both succeed. Conflicts are returned to the caller, never retried here.

pub mod batch;
pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchSummary, BATCH_COLUMNS};
pub use model::{Comparison, StockLot, StockLotValues, StockMovement, STOCK_LOT_ENTITY};
pub use service::InventoryService;
pub use store::StockStore;
