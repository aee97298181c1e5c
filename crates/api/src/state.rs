use std::sync::Arc;

use sockstock_core::inventory::InventoryService;
use sockstock_db::PgStockStore;

use crate::config::ServerConfig;

/// Inventory operations over the Postgres store.
pub type Inventory = InventoryService<PgStockStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sockstock_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Stock operations, bound to the same pool.
    pub inventory: Arc<Inventory>,
}

impl AppState {
    pub fn new(pool: sockstock_db::DbPool, config: ServerConfig) -> Self {
        let inventory = Arc::new(InventoryService::new(PgStockStore::new(pool.clone())));
        Self {
            pool,
            config: Arc::new(config),
            inventory,
        }
    }
}
