//! Handlers for the `/socks` resource.
//!
//! Thin adapters from HTTP to the inventory operations: stock income and
//! outcome, the filtered count, read and replace by id, and CSV batch upload.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sockstock_core::inventory::{BatchSummary, StockLot, StockMovement};
use sockstock_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, BatchFile};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the count endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountParams {
    pub color: String,
    pub comparison: String,
    pub cotton_percentage: i32,
}

/// POST /api/socks/income
///
/// Add stock to the lot matching `(color, cottonPercentage)`, creating it if
/// needed. Returns 409 if a concurrent write won the race.
pub async fn income(
    State(state): State<AppState>,
    ApiJson(movement): ApiJson<StockMovement>,
) -> AppResult<Json<DataResponse<StockLot>>> {
    let lot = state.inventory.income(&movement).await?;
    Ok(DataResponse::json(lot))
}

/// POST /api/socks/outcome
///
/// Take stock out of an existing lot. Returns 400 if the lot does not exist or
/// holds fewer socks than requested.
pub async fn outcome(
    State(state): State<AppState>,
    ApiJson(movement): ApiJson<StockMovement>,
) -> AppResult<Json<DataResponse<StockLot>>> {
    let lot = state.inventory.outcome(&movement).await?;
    Ok(DataResponse::json(lot))
}

/// GET /api/socks?color=&comparison=&cottonPercentage=
///
/// Number of lots of a color whose cotton percentage is `moreThan`,
/// `lessThan`, or `equal` to the given value.
pub async fn count_socks(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CountParams>,
) -> AppResult<Json<DataResponse<i64>>> {
    let count = state
        .inventory
        .count(&params.color, &params.comparison, params.cotton_percentage)
        .await?;
    Ok(DataResponse::json(count))
}

/// GET /api/socks/{id}
pub async fn get_socks(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<StockLot>>> {
    let lot = state.inventory.get(id).await?;
    Ok(DataResponse::json(lot))
}

/// PUT /api/socks/{id}
///
/// Replace a lot's color, cotton percentage, and quantity.
pub async fn update_socks(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(movement): ApiJson<StockMovement>,
) -> AppResult<Json<DataResponse<StockLot>>> {
    let lot = state.inventory.update(id, &movement).await?;
    Ok(DataResponse::json(lot))
}

/// POST /api/socks/batch
///
/// Apply a CSV file (`color,cottonPercentage,quantity`) row by row as
/// incomes. Rows before a failing row stay applied.
pub async fn upload_batch(
    State(state): State<AppState>,
    file: BatchFile,
) -> AppResult<Json<DataResponse<BatchSummary>>> {
    tracing::info!(file_name = %file.file_name, bytes = file.data.len(), "Received batch file");
    let summary = state.inventory.ingest_csv(&file.data).await?;
    Ok(DataResponse::json(summary))
}
