//! Grouping of review rows into per-game statistics.

use std::collections::HashMap;

use serde::Serialize;

use super::criteria::RatingAxis;
use super::tags::{Category, Mechanic, RecommendedPlayers, TagSet};

/// The game fields a search result carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameProjection {
    pub id: i32,
    pub name: String,
    pub japanese_name: Option<String>,
    pub image_url: Option<String>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub playing_time: Option<i32>,
    pub year_published: Option<i32>,
}

/// Scores a review gave on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ratings([Option<f64>; RatingAxis::COUNT]);

impl Ratings {
    #[must_use]
    pub const fn new(
        overall: Option<f64>,
        rule_complexity: Option<f64>,
        luck_factor: Option<f64>,
        interaction: Option<f64>,
        downtime: Option<f64>,
    ) -> Self {
        Self([overall, rule_complexity, luck_factor, interaction, downtime])
    }

    /// The score on `axis`, if the reviewer rated it.
    ///
    /// A stored zero is "not rated"; valid scores start at 1.
    #[must_use]
    pub fn get(&self, axis: RatingAxis) -> Option<f64> {
        self.0[axis.index()].filter(|v| *v != 0.0 && !v.is_nan())
    }
}

/// One published review joined to its game.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub game: GameProjection,
    pub ratings: Ratings,
    pub mechanics: TagSet<Mechanic>,
    pub categories: TagSet<Category>,
    pub recommended_players: TagSet<RecommendedPlayers>,
}

/// Statistics over every review of one game, built fresh per request.
#[derive(Debug, Clone)]
pub struct GameAggregate {
    pub game: GameProjection,
    pub review_count: usize,
    axis_values: [Vec<f64>; RatingAxis::COUNT],
    pub mechanics: TagSet<Mechanic>,
    pub categories: TagSet<Category>,
    pub recommended_players: TagSet<RecommendedPlayers>,
}

impl GameAggregate {
    fn new(game: GameProjection) -> Self {
        Self {
            game,
            review_count: 0,
            axis_values: Default::default(),
            mechanics: TagSet::empty(),
            categories: TagSet::empty(),
            recommended_players: TagSet::empty(),
        }
    }

    fn absorb(&mut self, review: &ReviewRecord) {
        self.review_count += 1;
        for axis in RatingAxis::ALL {
            if let Some(score) = review.ratings.get(axis) {
                self.axis_values[axis.index()].push(score);
            }
        }
        self.mechanics = self.mechanics.union(review.mechanics);
        self.categories = self.categories.union(review.categories);
        self.recommended_players = self.recommended_players.union(review.recommended_players);
    }

    /// Unrounded mean of `axis` over the reviews that rated it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self, axis: RatingAxis) -> Option<f64> {
        let values = &self.axis_values[axis.index()];
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// How many reviews rated `axis`.
    #[must_use]
    pub fn rated_count(&self, axis: RatingAxis) -> usize {
        self.axis_values[axis.index()].len()
    }

    #[must_use]
    pub fn summarize(&self) -> ReviewStats {
        let avg = |axis| self.mean(axis).map_or(0.0, round_one_decimal);

        ReviewStats {
            review_count: self.review_count,
            avg_overall_score: avg(RatingAxis::Overall),
            avg_rule_complexity: avg(RatingAxis::RuleComplexity),
            avg_luck_factor: avg(RatingAxis::LuckFactor),
            avg_interaction: avg(RatingAxis::Interaction),
            avg_downtime: avg(RatingAxis::Downtime),
            avg_actual_play_time: self.game.playing_time.filter(|t| *t != 0),
            popular_mechanics: self.mechanics,
            popular_categories: self.categories,
            popular_player_counts: self.recommended_players,
        }
    }
}

/// Per-game summary reported to clients. Unrated axes report `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub review_count: usize,
    pub avg_overall_score: f64,
    pub avg_rule_complexity: f64,
    pub avg_luck_factor: f64,
    pub avg_interaction: f64,
    pub avg_downtime: f64,
    pub avg_actual_play_time: Option<i32>,
    pub popular_mechanics: TagSet<Mechanic>,
    pub popular_categories: TagSet<Category>,
    pub popular_player_counts: TagSet<RecommendedPlayers>,
}

/// A search hit: the game's own fields plus its review statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    #[serde(flatten)]
    pub game: GameProjection,
    pub review_stats: ReviewStats,
}

/// Group reviews by game, keeping games in first-seen order.
#[must_use]
pub fn group_by_game<I>(reviews: I) -> Vec<GameAggregate>
where
    I: IntoIterator<Item = ReviewRecord>,
{
    let mut slots: HashMap<i32, usize> = HashMap::new();
    let mut aggregates: Vec<GameAggregate> = Vec::new();

    for review in reviews {
        let slot = *slots.entry(review.game.id).or_insert_with(|| {
            aggregates.push(GameAggregate::new(review.game.clone()));
            aggregates.len() - 1
        });
        aggregates[slot].absorb(&review);
    }

    aggregates
}

#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
