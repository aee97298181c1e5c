//! The `{ "data": ... }` envelope every successful socks response uses.

use axum::Json;
use serde::Serialize;

/// Success body: a lot, a count, or a batch summary under `data`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap `data` and hand it to axum as a JSON body.
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}
