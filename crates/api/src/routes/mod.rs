pub mod health;
pub mod socks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /socks                    count (GET)
/// /socks/income             register incoming stock (POST)
/// /socks/outcome            register outgoing stock (POST)
/// /socks/batch              CSV batch upload (POST, multipart)
/// /socks/{id}               get, replace (GET, PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/socks", socks::router())
}
