//! Inventory operations: income, outcome, count, read, and update.

use crate::error::CoreError;
use crate::inventory::model::{Comparison, StockLot, StockLotValues, StockMovement, STOCK_LOT_ENTITY};
use crate::inventory::store::StockStore;
use crate::types::DbId;

/// Result of applying an income to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Upsert {
    /// No lot existed for the key; a new one was inserted.
    Created(StockLot),
    /// An existing lot's quantity was increased.
    Incremented(StockLot),
}

impl Upsert {
    pub(crate) fn into_lot(self) -> StockLot {
        match self {
            Upsert::Created(lot) | Upsert::Incremented(lot) => lot,
        }
    }
}

/// Business operations over a [`StockStore`].
pub struct InventoryService<S> {
    store: S,
}

impl<S: StockStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register incoming socks: add to the matching lot or create it.
    pub async fn income(&self, movement: &StockMovement) -> Result<StockLot, CoreError> {
        movement.check()?;
        tracing::info!(
            color = %movement.color,
            cotton_percentage = movement.cotton_percentage,
            quantity = movement.quantity,
            "Processing income"
        );
        let lot = self.upsert(movement).await?.into_lot();
        tracing::info!(id = lot.id, quantity = lot.quantity, version = lot.version, "Income applied");
        Ok(lot)
    }

    /// Register outgoing socks, refusing to take a lot below zero.
    pub async fn outcome(&self, movement: &StockMovement) -> Result<StockLot, CoreError> {
        movement.check()?;
        tracing::info!(
            color = %movement.color,
            cotton_percentage = movement.cotton_percentage,
            quantity = movement.quantity,
            "Processing outcome"
        );

        let Some(lot) = self
            .store
            .find_by_key(&movement.color, movement.cotton_percentage)
            .await?
        else {
            tracing::warn!(
                color = %movement.color,
                cotton_percentage = movement.cotton_percentage,
                "No stock lot for outcome"
            );
            return Err(CoreError::Validation(
                "No socks with these parameters".to_string(),
            ));
        };

        if movement.quantity > lot.quantity {
            tracing::warn!(
                id = lot.id,
                requested = movement.quantity,
                available = lot.quantity,
                "Not enough socks for outcome"
            );
            return Err(CoreError::Validation(format!(
                "Not enough socks: requested {}, available {}",
                movement.quantity, lot.quantity
            )));
        }

        let values = StockLotValues::requantified(&lot, lot.quantity - movement.quantity);
        let updated = self
            .store
            .update(lot.id, lot.version, &values)
            .await
            .inspect_err(|e| log_conflict(e, lot.id))?;
        tracing::info!(id = updated.id, quantity = updated.quantity, version = updated.version, "Outcome applied");
        Ok(updated)
    }

    /// Count lots of `color` whose cotton percentage satisfies `comparison`.
    ///
    /// Returns the number of matching lots, not the sum of their quantities.
    pub async fn count(
        &self,
        color: &str,
        comparison: &str,
        cotton_percentage: i32,
    ) -> Result<i64, CoreError> {
        let comparison: Comparison = comparison.parse().inspect_err(|_| {
            tracing::warn!(comparison, "Invalid comparison operator");
        })?;
        let count = self.store.count(color, comparison, cotton_percentage).await?;
        tracing::debug!(color, %comparison, cotton_percentage, count, "Counted stock lots");
        Ok(count)
    }

    /// Fetch a lot by id.
    pub async fn get(&self, id: DbId) -> Result<StockLot, CoreError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: STOCK_LOT_ENTITY,
                id,
            })
    }

    /// Replace a lot's color, cotton percentage, and quantity outright.
    ///
    /// The write still goes through the version check. Moving a lot onto a
    /// key another lot already holds is refused by the store as a conflict.
    pub async fn update(&self, id: DbId, movement: &StockMovement) -> Result<StockLot, CoreError> {
        movement.check()?;
        let lot = self.get(id).await?;
        let updated = self
            .store
            .update(lot.id, lot.version, &StockLotValues::from(movement))
            .await
            .inspect_err(|e| log_conflict(e, lot.id))?;
        tracing::info!(
            id = updated.id,
            color = %updated.color,
            cotton_percentage = updated.cotton_percentage,
            quantity = updated.quantity,
            "Stock lot updated"
        );
        Ok(updated)
    }

    /// Find-or-create then increment. Shared by income and batch ingestion.
    ///
    /// Callers validate `movement` first.
    pub(crate) async fn upsert(&self, movement: &StockMovement) -> Result<Upsert, CoreError> {
        match self
            .store
            .find_by_key(&movement.color, movement.cotton_percentage)
            .await?
        {
            Some(lot) => {
                let quantity = lot.quantity.checked_add(movement.quantity).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Income of {} would overflow the stock of lot {}",
                        movement.quantity, lot.id
                    ))
                })?;
                let updated = self
                    .store
                    .update(lot.id, lot.version, &StockLotValues::requantified(&lot, quantity))
                    .await
                    .inspect_err(|e| log_conflict(e, lot.id))?;
                Ok(Upsert::Incremented(updated))
            }
            None => {
                let created = self
                    .store
                    .insert(&StockLotValues::from(movement))
                    .await
                    .inspect_err(|e| {
                        if matches!(e, CoreError::Conflict(_)) {
                            tracing::error!(
                                color = %movement.color,
                                cotton_percentage = movement.cotton_percentage,
                                "Concurrent insert of the same stock lot"
                            );
                        }
                    })?;
                Ok(Upsert::Created(created))
            }
        }
    }
}

fn log_conflict(err: &CoreError, id: DbId) {
    if matches!(err, CoreError::Conflict(_)) {
        tracing::error!(id, "Optimistic lock conflict on stock lot");
    }
}
