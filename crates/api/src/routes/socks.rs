//! Route definitions for the `/socks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::socks;
use crate::state::AppState;

/// Routes mounted at `/socks`.
///
/// ```text
/// GET    /            -> count_socks  (?color=&comparison=&cottonPercentage=)
/// POST   /income      -> income
/// POST   /outcome     -> outcome
/// POST   /batch       -> upload_batch (multipart field `file`)
/// GET    /{id}        -> get_socks
/// PUT    /{id}        -> update_socks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(socks::count_socks))
        .route("/income", post(socks::income))
        .route("/outcome", post(socks::outcome))
        .route("/batch", post(socks::upload_batch))
        .route("/{id}", get(socks::get_socks).put(socks::update_socks))
}
