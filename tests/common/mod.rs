#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use boardgame_review_api::config::{Config, Environment, SearchConfig};
use boardgame_review_api::entities::{game, review};
use boardgame_review_api::search::tags::{Tag, TagSet};
use boardgame_review_api::state::AppState;

pub fn test_config(search: SearchConfig) -> Config {
    Config {
        database_url: String::new(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        frontend_url: "http://localhost:3001".to_string(),
        search,
    }
}

/// Build the app router backed by an in-memory `SQLite` database with migrations.
pub async fn test_app_with(search: SearchConfig) -> (Router, AppState) {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();

    let state = AppState {
        db,
        config: test_config(search),
    };

    let app = boardgame_review_api::routes::router().with_state(state.clone());
    (app, state)
}

pub async fn test_app() -> (Router, AppState) {
    test_app_with(SearchConfig::default()).await
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let (status, _headers, body) = get_with_headers(app, uri).await;
    (status, body)
}

/// Like [`get`], also returning the response headers.
pub async fn get_with_headers(
    app: &Router,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();

    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, headers, body_str)
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or(serde_json::Value::Null)
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeding
// ─────────────────────────────────────────────────────────────────────────────

pub struct GameSeed {
    pub name: &'static str,
    pub japanese_name: Option<&'static str>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub playing_time: Option<i32>,
}

impl Default for GameSeed {
    fn default() -> Self {
        Self {
            name: "Untitled",
            japanese_name: None,
            min_players: Some(2),
            max_players: Some(4),
            playing_time: Some(60),
        }
    }
}

pub async fn insert_game(db: &DatabaseConnection, seed: GameSeed) -> anyhow::Result<game::Model> {
    let now = Utc::now().fixed_offset();
    let model = game::ActiveModel {
        id: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        name: Set(seed.name.to_string()),
        japanese_name: Set(seed.japanese_name.map(str::to_string)),
        image_url: Set(None),
        min_players: Set(seed.min_players),
        max_players: Set(seed.max_players),
        playing_time: Set(seed.playing_time),
        year_published: Set(Some(2020)),
    };
    Ok(model.insert(db).await?)
}

pub struct ReviewSeed {
    pub overall: Option<f64>,
    pub complexity: Option<f64>,
    pub luck: Option<f64>,
    pub interaction: Option<f64>,
    pub downtime: Option<f64>,
    pub mechanic_flags: i32,
    pub category_flags: i32,
    pub recommended_player_flags: i32,
    pub published: bool,
}

impl Default for ReviewSeed {
    fn default() -> Self {
        Self {
            overall: None,
            complexity: None,
            luck: None,
            interaction: None,
            downtime: None,
            mechanic_flags: 0,
            category_flags: 0,
            recommended_player_flags: 0,
            published: true,
        }
    }
}

impl ReviewSeed {
    pub fn overall(score: f64) -> Self {
        Self {
            overall: Some(score),
            ..Self::default()
        }
    }
}

/// Encode tags the way the flag columns store them.
pub fn flags<T: Tag>(tags: &[T]) -> i32 {
    tags.iter().copied().collect::<TagSet<T>>().to_column()
}

pub async fn insert_review(
    db: &DatabaseConnection,
    game_id: i32,
    seed: ReviewSeed,
) -> anyhow::Result<review::Model> {
    let now = Utc::now().fixed_offset();
    let model = review::ActiveModel {
        id: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
        game_id: Set(game_id),
        title: Set("Review".to_string()),
        content: Set("Played it.".to_string()),
        overall_score: Set(seed.overall),
        complexity_score: Set(seed.complexity),
        luck_factor: Set(seed.luck),
        interaction_score: Set(seed.interaction),
        downtime_score: Set(seed.downtime),
        mechanic_flags: Set(seed.mechanic_flags),
        category_flags: Set(seed.category_flags),
        recommended_player_flags: Set(seed.recommended_player_flags),
        is_published: Set(seed.published),
    };
    Ok(model.insert(db).await?)
}
