mod games;
mod health;
mod search;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health`: lightweight liveness check
/// - `GET /api/v1/health`: detailed health check with database connectivity
/// - `GET /api/v1/search/reviews`: games ranked and filtered by their reviews
/// - `GET /api/v1/search/options`: tag catalogue and default filter ranges
/// - `GET /api/v1/games/{id}/stats`: per-game tag vote statistics
pub fn router() -> Router<AppState> {
    let api_v1 = Router::new()
        .merge(health::api_router())
        .nest("/search", search::router())
        .nest("/games", games::router());

    Router::new()
        .merge(health::root_router())
        .nest("/api/v1", api_v1)
}
