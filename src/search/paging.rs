use serde::Serialize;

use super::aggregate::{GameSummary, ReviewStats};
use super::criteria::{SortKey, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub total_games: u64,
    pub avg_overall_score: f64,
}

#[allow(clippy::cast_precision_loss)]
fn sort_value(key: SortKey, stats: &ReviewStats) -> f64 {
    match key {
        SortKey::OverallScore => stats.avg_overall_score,
        SortKey::RuleComplexity => stats.avg_rule_complexity,
        SortKey::LuckFactor => stats.avg_luck_factor,
        SortKey::Interaction => stats.avg_interaction,
        SortKey::Downtime => stats.avg_downtime,
        SortKey::ReviewCount => stats.review_count as f64,
    }
}

/// Stable sort on the rounded summary values; ties keep their current order.
pub fn sort_summaries(summaries: &mut [GameSummary], key: SortKey, order: SortOrder) {
    summaries.sort_by(|a, b| {
        let ordering =
            sort_value(key, &a.review_stats).total_cmp(&sort_value(key, &b.review_stats));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Mean of the displayed overall averages across every matched game.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn facets(summaries: &[GameSummary]) -> Facets {
    let total = summaries.len();
    let avg_overall_score = if total == 0 {
        0.0
    } else {
        summaries
            .iter()
            .map(|s| s.review_stats.avg_overall_score)
            .sum::<f64>()
            / total as f64
    };

    Facets {
        total_games: u64::try_from(total).unwrap_or(u64::MAX),
        avg_overall_score,
    }
}

/// Cut one page out of the sorted list. `page` and `limit` must be at least 1.
#[must_use]
pub fn paginate(summaries: Vec<GameSummary>, page: u64, limit: u64) -> (Vec<GameSummary>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = u64::try_from(summaries.len()).unwrap_or(u64::MAX);
    let total_pages = total.div_ceil(limit);

    let offset = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let data = summaries.into_iter().skip(offset).take(take).collect();

    (
        data,
        Pagination {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    )
}
