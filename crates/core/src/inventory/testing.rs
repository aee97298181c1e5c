//! In-memory [`StockStore`] used by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::inventory::model::{Comparison, StockLot, StockLotValues};
use crate::inventory::store::StockStore;
use crate::types::DbId;

#[derive(Default)]
pub(crate) struct MemoryStore {
    lots: Mutex<Vec<StockLot>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub(crate) fn snapshot(&self) -> Vec<StockLot> {
        self.lots.lock().unwrap().clone()
    }

    /// Number of successful inserts and updates so far.
    pub(crate) fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub(crate) fn quantity_of(&self, color: &str, cotton_percentage: i32) -> Option<i32> {
        self.lots
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.color == color && l.cotton_percentage == cotton_percentage)
            .map(|l| l.quantity)
    }

    fn key_taken(lots: &[StockLot], values: &StockLotValues, except: Option<DbId>) -> bool {
        lots.iter().any(|l| {
            Some(l.id) != except
                && l.color == values.color
                && l.cotton_percentage == values.cotton_percentage
        })
    }

    fn record_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn find_by_key(
        &self,
        color: &str,
        cotton_percentage: i32,
    ) -> Result<Option<StockLot>, CoreError> {
        Ok(self
            .lots
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.color == color && l.cotton_percentage == cotton_percentage)
            .cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<StockLot>, CoreError> {
        Ok(self.lots.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, values: &StockLotValues) -> Result<StockLot, CoreError> {
        let lot = {
            let mut lots = self.lots.lock().unwrap();
            if Self::key_taken(&lots, values, None) {
                return Err(CoreError::Conflict("duplicate stock lot".into()));
            }
            let now = chrono::Utc::now();
            let lot = StockLot {
                id: lots.len() as DbId + 1,
                color: values.color.clone(),
                cotton_percentage: values.cotton_percentage,
                quantity: values.quantity,
                version: 0,
                created_at: now,
                updated_at: now,
            };
            lots.push(lot.clone());
            lot
        };
        self.record_write();
        Ok(lot)
    }

    async fn update(
        &self,
        id: DbId,
        expected_version: i32,
        values: &StockLotValues,
    ) -> Result<StockLot, CoreError> {
        let lot = {
            let mut lots = self.lots.lock().unwrap();
            if Self::key_taken(&lots, values, Some(id)) {
                return Err(CoreError::Conflict("duplicate stock lot".into()));
            }
            let lot = lots
                .iter_mut()
                .find(|l| l.id == id && l.version == expected_version)
                .ok_or_else(|| CoreError::Conflict("stale version".into()))?;
            lot.color = values.color.clone();
            lot.cotton_percentage = values.cotton_percentage;
            lot.quantity = values.quantity;
            lot.version += 1;
            lot.updated_at = chrono::Utc::now();
            lot.clone()
        };
        self.record_write();
        Ok(lot)
    }

    async fn count(
        &self,
        color: &str,
        comparison: Comparison,
        cotton_percentage: i32,
    ) -> Result<i64, CoreError> {
        Ok(self
            .lots
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.color == color && comparison.matches(l.cotton_percentage, cotton_percentage))
            .count() as i64)
    }
}
