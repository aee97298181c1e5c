//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod stock_lot_repo;

pub use stock_lot_repo::StockLotRepo;
