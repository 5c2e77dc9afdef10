//! Review-derived game search.
//!
//! Reviews are grouped per game, summarized, filtered, sorted and paginated
//! entirely in memory. Nothing here touches the database.

pub mod aggregate;
pub mod criteria;
pub mod filter;
pub mod paging;
pub mod tags;
pub mod votes;

use aggregate::{GameSummary, ReviewRecord, group_by_game};
use criteria::FilterCriteria;
use filter::AggregationPolicy;
use paging::{Facets, Pagination};

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub data: Vec<GameSummary>,
    pub pagination: Pagination,
    pub facets: Facets,
}

/// Run the full search pipeline over already-fetched reviews.
#[must_use]
pub fn run<I>(reviews: I, criteria: &FilterCriteria, policy: AggregationPolicy) -> SearchOutcome
where
    I: IntoIterator<Item = ReviewRecord>,
{
    let aggregates = group_by_game(reviews);
    let grouped = aggregates.len();

    let mut matched: Vec<GameSummary> = aggregates
        .into_iter()
        .filter(|aggregate| filter::matches(aggregate, criteria, policy))
        .map(|aggregate| GameSummary {
            review_stats: aggregate.summarize(),
            game: aggregate.game,
        })
        .collect();

    tracing::debug!(grouped, matched = matched.len(), "filtered game aggregates");

    paging::sort_summaries(&mut matched, criteria.sort_by, criteria.sort_order);
    let facets = paging::facets(&matched);
    let (data, pagination) = paging::paginate(matched, criteria.page, criteria.limit);

    SearchOutcome {
        data,
        pagination,
        facets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregate::fixtures::review;
    use criteria::{Bounds, RatingAxis, SortKey, SortOrder};

    #[test]
    fn two_reviews_of_one_game_without_filters() {
        let outcome = run(
            vec![review(1, Some(8.0)), review(1, Some(9.0))],
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        );

        assert_eq!(outcome.data.len(), 1);
        let stats = &outcome.data[0].review_stats;
        assert_eq!(outcome.data[0].game.id, 1);
        assert_eq!(stats.review_count, 2);
        assert!((stats.avg_overall_score - 8.5).abs() < f64::EPSILON);
        assert_eq!(outcome.pagination.total, 1);
        assert_eq!(outcome.facets.total_games, 1);
    }

    #[test]
    fn no_reviews_yield_an_empty_page() {
        let outcome = run(
            Vec::new(),
            &FilterCriteria::default(),
            AggregationPolicy::default(),
        );

        assert!(outcome.data.is_empty());
        assert_eq!(outcome.pagination.total, 0);
        assert_eq!(outcome.pagination.page, 1);
        assert!(outcome.facets.avg_overall_score.abs() < f64::EPSILON);
    }

    #[test]
    fn filters_then_sorts_then_pages() {
        let reviews = vec![
            review(1, Some(6.9)),
            review(2, Some(8.5)),
            review(3, Some(7.2)),
            review(4, Some(9.0)),
            review(5, None),
        ];
        let mut criteria = FilterCriteria {
            sort_order: SortOrder::Asc,
            limit: 2,
            page: 2,
            ..FilterCriteria::default()
        };
        criteria.axis_bounds[RatingAxis::Overall.index()] = Bounds::new(Some(7.0), Some(9.0));

        let outcome = run(reviews, &criteria, AggregationPolicy::default());

        // Game 1 is below the range; game 5 has no overall ratings and bypasses it.
        assert_eq!(outcome.pagination.total, 4);
        assert_eq!(outcome.pagination.total_pages, 2);
        let ids: Vec<i32> = outcome.data.iter().map(|s| s.game.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(outcome.pagination.has_prev);
        assert!(!outcome.pagination.has_next);
    }

    #[test]
    fn facets_cover_all_matches_not_just_the_page() {
        let reviews = vec![review(1, Some(4.0)), review(2, Some(6.0)), review(3, Some(8.0))];
        let criteria = FilterCriteria {
            limit: 1,
            sort_by: SortKey::OverallScore,
            ..FilterCriteria::default()
        };

        let outcome = run(reviews, &criteria, AggregationPolicy::default());

        assert_eq!(outcome.data.len(), 1);
        assert_eq!(outcome.data[0].game.id, 3);
        assert_eq!(outcome.facets.total_games, 3);
        assert!((outcome.facets.avg_overall_score - 6.0).abs() < f64::EPSILON);
    }
}
