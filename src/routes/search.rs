use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::search::aggregate::GameSummary;
use crate::search::criteria::{FilterCriteria, RatingAxis};
use crate::search::paging::{Facets, Pagination};
use crate::search::tags::{Category, Mechanic, RecommendedPlayers, Tag};
use crate::services::ReviewService;
use crate::state::AppState;

/// Review search router, nested under `/search`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(search_reviews))
        .route("/options", get(search_options))
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    data: Vec<GameSummary>,
    pagination: Pagination,
    filters: serde_json::Value,
    facets: Facets,
}

#[derive(Serialize)]
struct TagOption {
    slug: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct CountOption {
    value: u8,
    label: &'static str,
}

#[derive(Serialize)]
struct RangeOption {
    min: u16,
    max: u16,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOptionsResponse {
    success: bool,
    mechanics: Vec<TagOption>,
    categories: Vec<TagOption>,
    recommended_player_counts: Vec<CountOption>,
    game_player_counts: Vec<CountOption>,
    ranges: BTreeMap<&'static str, RangeOption>,
}

/// Player counts offered for the game-declared filter; the last one reads as "or more".
const GAME_PLAYER_COUNT_OPTIONS: [(u8, &str); 7] = [
    (1, "1人"),
    (2, "2人"),
    (3, "3人"),
    (4, "4人"),
    (5, "5人"),
    (6, "6人"),
    (7, "7人以上"),
];

const PLAY_TIME_RANGE: RangeOption = RangeOption { min: 15, max: 180 };

// ============================================================================
// Handlers
// ============================================================================

/// `GET /search/reviews`: games ranked by their published reviews.
async fn search_reviews(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = FilterCriteria::from_pairs(&pairs, state.config.search.max_page_size);

    let reviews = ReviewService::published_reviews(&state.db, &criteria).await?;
    let outcome = crate::search::run(reviews, &criteria, state.config.search.policy());

    tracing::info!(
        total = outcome.pagination.total,
        page = outcome.pagination.page,
        "review search completed"
    );

    Ok(Json(SearchResponse {
        success: true,
        data: outcome.data,
        pagination: outcome.pagination,
        filters: criteria.echo(),
        facets: outcome.facets,
    }))
}

/// `GET /search/options`: the tag catalogue and default slider ranges.
async fn search_options() -> impl IntoResponse {
    let mut ranges: BTreeMap<&'static str, RangeOption> = RatingAxis::ALL
        .iter()
        .map(|axis| {
            let max = if *axis == RatingAxis::Overall { 10 } else { 5 };
            (axis.param_stem(), RangeOption { min: 1, max })
        })
        .collect();
    ranges.insert("playTime", PLAY_TIME_RANGE);

    Json(SearchOptionsResponse {
        success: true,
        mechanics: tag_options::<Mechanic>(),
        categories: tag_options::<Category>(),
        recommended_player_counts: RecommendedPlayers::ALL
            .iter()
            .map(|bucket| CountOption {
                value: bucket.count(),
                label: bucket.label(),
            })
            .collect(),
        game_player_counts: GAME_PLAYER_COUNT_OPTIONS
            .iter()
            .map(|&(value, label)| CountOption { value, label })
            .collect(),
        ranges,
    })
}

fn tag_options<T: Tag>() -> Vec<TagOption> {
    T::ALL
        .iter()
        .map(|tag| TagOption {
            slug: tag.slug(),
            label: tag.label(),
        })
        .collect()
}
