use super::aggregate::GameAggregate;
use super::criteria::{FilterCriteria, RatingAxis};
use super::tags::RecommendedPlayers;

/// Playing-time upper bounds at or above this many minutes mean "no limit".
pub const UNBOUNDED_PLAY_TIME_MINUTES: f64 = 180.0;

/// Knobs for behavior that callers may want to change per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationPolicy {
    /// When a game has no ratings on an axis, ignore that axis's bounds instead
    /// of excluding the game.
    pub skip_filter_when_unrated: bool,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            skip_filter_when_unrated: true,
        }
    }
}

/// Whether `aggregate` passes every filter in `criteria`.
#[must_use]
pub fn matches(aggregate: &GameAggregate, criteria: &FilterCriteria, policy: AggregationPolicy) -> bool {
    RatingAxis::ALL
        .iter()
        .all(|axis| axis_matches(aggregate, criteria, *axis, policy))
        && play_time_matches(aggregate, criteria)
        && recommended_players_match(aggregate, &criteria.recommended_player_counts)
        && criteria.mechanics.is_satisfied_by(aggregate.mechanics)
        && criteria.categories.is_satisfied_by(aggregate.categories)
}

fn axis_matches(
    aggregate: &GameAggregate,
    criteria: &FilterCriteria,
    axis: RatingAxis,
    policy: AggregationPolicy,
) -> bool {
    let bounds = criteria.bounds(axis);
    if bounds.is_open() {
        return true;
    }
    match aggregate.mean(axis) {
        Some(mean) => bounds.contains(mean),
        None => policy.skip_filter_when_unrated,
    }
}

fn play_time_matches(aggregate: &GameAggregate, criteria: &FilterCriteria) -> bool {
    let Some(minutes) = aggregate.game.playing_time.filter(|t| *t != 0) else {
        return true;
    };
    let minutes = f64::from(minutes);

    if criteria.play_time.min.is_some_and(|min| minutes < min) {
        return false;
    }
    !criteria
        .play_time
        .max
        .is_some_and(|max| max < UNBOUNDED_PLAY_TIME_MINUTES && minutes > max)
}

fn recommended_players_match(aggregate: &GameAggregate, requested: &[i32]) -> bool {
    requested.is_empty()
        || requested.iter().any(|count| {
            RecommendedPlayers::from_count(*count)
                .is_some_and(|bucket| aggregate.recommended_players.contains(bucket))
        })
}
