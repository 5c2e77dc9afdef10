mod common;

use axum::http::{StatusCode, header};
use serde_json::json;

use boardgame_review_api::search::tags::{Category, Mechanic, RecommendedPlayers};
use common::{GameSeed, ReviewSeed, flags, insert_game, insert_review};

#[tokio::test]
async fn stats_report_vote_share_per_tag() -> anyhow::Result<()> {
    let (app, state) = common::test_app().await;
    let game = insert_game(&state.db, GameSeed::default()).await?;

    let mechanics = [
        flags(&[Mechanic::AreaControl, Mechanic::Drafting]),
        flags(&[Mechanic::AreaControl, Mechanic::Drafting]),
        flags(&[Mechanic::AreaControl]),
    ];
    for mechanic_flags in mechanics {
        insert_review(
            &state.db,
            game.id,
            ReviewSeed {
                mechanic_flags,
                recommended_player_flags: flags(&[RecommendedPlayers::Three]),
                ..ReviewSeed::overall(7.0)
            },
        )
        .await?;
    }
    // Unpublished votes don't count.
    insert_review(
        &state.db,
        game.id,
        ReviewSeed {
            category_flags: flags(&[Category::Party]),
            published: false,
            ..ReviewSeed::default()
        },
    )
    .await?;

    let (status, headers, body) =
        common::get_with_headers(&app, &format!("/api/v1/games/{}/stats", game.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("public, s-maxage=60, stale-while-revalidate=300")
    );

    let json = common::json(&body);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["mechanics"],
        json!([
            {
                "name": "エリア支配",
                "reviewVotes": 3,
                "totalReviews": 3,
                "percentage": 100.0,
                "displayPriority": "highlight"
            },
            {
                "name": "ドラフト",
                "reviewVotes": 2,
                "totalReviews": 3,
                "percentage": 67.0,
                "displayPriority": "normal"
            }
        ])
    );
    assert_eq!(json["categories"], json!([]));
    assert_eq!(json["playerCounts"][0]["name"], "3人");
    assert_eq!(json["metadata"]["gameId"], game.id);
    assert_eq!(json["metadata"]["totalItems"], 3);
    assert!(json["metadata"]["generatedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn game_without_reviews_has_empty_stats() -> anyhow::Result<()> {
    let (app, state) = common::test_app().await;
    let game = insert_game(&state.db, GameSeed::default()).await?;

    let (status, body) = common::get(&app, &format!("/api/v1/games/{}/stats", game.id)).await;
    assert_eq!(status, StatusCode::OK);

    let json = common::json(&body);
    assert_eq!(json["mechanics"], json!([]));
    assert_eq!(json["playerCounts"], json!([]));
    assert_eq!(json["metadata"]["totalItems"], 0);
    Ok(())
}

#[tokio::test]
async fn unknown_game_returns_404() {
    let (app, _state) = common::test_app().await;
    let (status, body) = common::get(&app, "/api/v1/games/999/stats").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = common::json(&body);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Game not found");
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let (app, _state) = common::test_app().await;
    let (status, body) = common::get(&app, "/api/v1/games/catan/stats").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = common::json(&body);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid game ID");
}
