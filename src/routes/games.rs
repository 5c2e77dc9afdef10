use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::search::votes::{self, GameTagStats};
use crate::services::ReviewService;
use crate::state::AppState;

const STATS_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=300";

/// Per-game router, nested under `/games`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/stats", get(game_stats))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsMetadata {
    generated_at: DateTime<Utc>,
    game_id: i32,
    total_items: usize,
}

#[derive(Serialize)]
struct GameStatsResponse {
    success: bool,
    #[serde(flatten)]
    stats: GameTagStats,
    metadata: StatsMetadata,
}

/// `GET /games/{id}/stats`: how often reviewers picked each tag for this game.
async fn game_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let game_id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid game ID".to_string()))?;

    let reviews = ReviewService::game_reviews(&state.db, game_id).await?;
    let stats = votes::tally(&reviews);

    let metadata = StatsMetadata {
        generated_at: Utc::now(),
        game_id,
        total_items: stats.total_items(),
    };

    Ok((
        [(header::CACHE_CONTROL, STATS_CACHE_CONTROL)],
        Json(GameStatsResponse {
            success: true,
            stats,
            metadata,
        }),
    ))
}
