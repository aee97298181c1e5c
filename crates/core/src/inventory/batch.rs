//! CSV batch ingestion.
//!
//! Each data row is applied as an independent income, in file order. There
//! is no transaction spanning rows: when a row fails, ingestion stops and the
//! rows before it stay committed.

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::CoreError;
use crate::inventory::model::StockMovement;
use crate::inventory::service::{InventoryService, Upsert};
use crate::inventory::store::StockStore;

/// Header names a batch file must carry, in any order.
pub const BATCH_COLUMNS: [&str; 3] = ["color", "cottonPercentage", "quantity"];

/// Outcome of a successful batch ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub rows_processed: usize,
    pub lots_created: usize,
    pub lots_updated: usize,
}

/// Positions of the three batch columns within a header record.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    color: usize,
    cotton_percentage: usize,
    quantity: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, CoreError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let expected = || BATCH_COLUMNS.join(", ");

        if headers.len() != BATCH_COLUMNS.len() {
            return Err(CoreError::Validation(format!(
                "CSV header must name exactly the columns {}, got {}",
                expected(),
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }

        match (
            position("color"),
            position("cottonPercentage"),
            position("quantity"),
        ) {
            (Some(color), Some(cotton_percentage), Some(quantity)) => Ok(Self {
                color,
                cotton_percentage,
                quantity,
            }),
            _ => Err(CoreError::Validation(format!(
                "CSV header must name exactly the columns {}, got {}",
                expected(),
                headers.iter().collect::<Vec<_>>().join(", ")
            ))),
        }
    }

    fn movement(&self, row: usize, record: &StringRecord) -> Result<StockMovement, CoreError> {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let movement = StockMovement {
            color: field(self.color).to_string(),
            cotton_percentage: parse_int(row, "cottonPercentage", field(self.cotton_percentage))?,
            quantity: parse_int(row, "quantity", field(self.quantity))?,
        };
        movement.check().map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("Invalid data in CSV row {row}: {msg}"))
            }
            other => other,
        })?;
        Ok(movement)
    }
}

fn parse_int(row: usize, column: &str, value: &str) -> Result<i32, CoreError> {
    value.parse::<i32>().map_err(|_| {
        CoreError::Validation(format!(
            "Invalid data in CSV row {row}: {column} '{value}' is not an integer"
        ))
    })
}

/// Classify a reader error. `row` is the 1-based data row, 0 for the header.
fn classify_csv_error(row: usize, err: csv::Error) -> CoreError {
    let at = if row == 0 {
        "CSV header".to_string()
    } else {
        format!("CSV row {row}")
    };
    match err.kind() {
        ErrorKind::Io(io) => CoreError::Internal(format!("Failed to read {at}: {io}")),
        ErrorKind::Utf8 { .. } => CoreError::Validation(format!("{at} is not valid UTF-8")),
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => CoreError::Validation(format!(
            "{at} has {len} fields, expected {expected_len}"
        )),
        _ => CoreError::Validation(format!("Malformed {at}: {err}")),
    }
}

impl<S: StockStore> InventoryService<S> {
    /// Apply every row of a CSV payload as an income.
    ///
    /// Fails with `CoreError::Validation` for an empty payload, a bad header,
    /// or the first malformed row; rows before that row remain applied.
    pub async fn ingest_csv(&self, data: &[u8]) -> Result<BatchSummary, CoreError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Rejected empty batch upload");
            return Err(CoreError::Validation("File is empty".to_string()));
        }
        tracing::info!(bytes = data.len(), "Processing batch upload");

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(data);
        let headers = reader
            .headers()
            .map_err(|e| classify_csv_error(0, e))?
            .clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut summary = BatchSummary::default();
        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| classify_csv_error(row, e))?;
            let movement = columns.movement(row, &record).inspect_err(|e| {
                tracing::warn!(row, error = %e, "Invalid batch row");
            })?;

            tracing::debug!(
                row,
                color = %movement.color,
                cotton_percentage = movement.cotton_percentage,
                quantity = movement.quantity,
                "Applying batch row"
            );
            match self.upsert(&movement).await? {
                Upsert::Created(_) => summary.lots_created += 1,
                Upsert::Incremented(_) => summary.lots_updated += 1,
            }
            summary.rows_processed += 1;
        }

        tracing::info!(
            rows = summary.rows_processed,
            created = summary.lots_created,
            updated = summary.lots_updated,
            "Batch upload processed"
        );
        Ok(summary)
    }
}
