use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{game, review};
use crate::error::AppError;
use crate::search::aggregate::{GameProjection, Ratings, ReviewRecord};
use crate::search::criteria::FilterCriteria;
use crate::search::tags::TagSet;

/// From this many players up, a game only needs to support at least that many.
pub const LARGE_GROUP_PLAYER_COUNT: i32 = 8;

const LIKE_ESCAPE: char = '!';

pub struct ReviewService;

impl ReviewService {
    /// Published reviews joined to their games, narrowed by the filters the
    /// database can evaluate: the name query and game-declared player counts.
    pub async fn published_reviews(
        db: &DatabaseConnection,
        criteria: &FilterCriteria,
    ) -> Result<Vec<ReviewRecord>, AppError> {
        let mut select = review::Entity::find()
            .find_also_related(game::Entity)
            .filter(review::Column::IsPublished.eq(true));

        if let Some(query) = criteria.query.as_deref() {
            select = select.filter(name_matches(query));
        }
        if !criteria.game_player_counts.is_empty() {
            select = select.filter(supports_any_player_count(&criteria.game_player_counts));
        }

        let rows = select.order_by_asc(review::Column::Id).all(db).await?;
        let fetched = rows.len();

        let records: Vec<ReviewRecord> = rows
            .into_iter()
            .filter_map(|(review, game)| game.map(|game| to_record(review, GameProjection::from(game))))
            .collect();

        tracing::debug!(fetched, kept = records.len(), "loaded published reviews");
        Ok(records)
    }

    /// Published reviews of one game.
    pub async fn game_reviews(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<Vec<ReviewRecord>, AppError> {
        let game = game::Entity::find_by_id(game_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
        let projection = GameProjection::from(game);

        let reviews = review::Entity::find()
            .filter(review::Column::GameId.eq(game_id))
            .filter(review::Column::IsPublished.eq(true))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?;

        Ok(reviews
            .into_iter()
            .map(|review| to_record(review, projection.clone()))
            .collect())
    }
}

impl From<game::Model> for GameProjection {
    fn from(game: game::Model) -> Self {
        Self {
            id: game.id,
            name: game.name,
            japanese_name: game.japanese_name,
            image_url: game.image_url,
            min_players: game.min_players,
            max_players: game.max_players,
            playing_time: game.playing_time,
            year_published: game.year_published,
        }
    }
}

fn to_record(review: review::Model, game: GameProjection) -> ReviewRecord {
    ReviewRecord {
        game,
        ratings: Ratings::new(
            review.overall_score,
            review.complexity_score,
            review.luck_factor,
            review.interaction_score,
            review.downtime_score,
        ),
        mechanics: TagSet::from_column(review.mechanic_flags),
        categories: TagSet::from_column(review.category_flags),
        recommended_players: TagSet::from_column(review.recommended_player_flags),
    }
}

/// Case-insensitive substring match on either game name.
fn name_matches(query: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
    let lower_like = |column: game::Column| {
        Expr::expr(Func::lower(Expr::col((game::Entity, column))))
            .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE))
    };

    Condition::any()
        .add(lower_like(game::Column::Name))
        .add(lower_like(game::Column::JapaneseName))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, LIKE_ESCAPE | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// The game supports at least one of `counts`.
fn supports_any_player_count(counts: &[i32]) -> Condition {
    counts.iter().fold(Condition::any(), |any, &count| {
        if count >= LARGE_GROUP_PLAYER_COUNT {
            any.add(game::Column::MaxPlayers.gte(count))
        } else {
            any.add(
                Condition::all()
                    .add(game::Column::MinPlayers.lte(count))
                    .add(game::Column::MaxPlayers.gte(count)),
            )
        }
    })
}
