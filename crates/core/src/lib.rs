//! Domain layer for the sock stock service.
//!
//! Holds the error taxonomy, the stock lot model, the [`inventory::StockStore`]
//! persistence seam, and the business operations built on top of it. Nothing
//! here knows about HTTP or SQL.

pub mod error;
pub mod inventory;
pub mod types;
