//! Per-game tag vote statistics: what share of a game's reviews picked each tag.

use serde::Serialize;

use super::aggregate::ReviewRecord;
use super::tags::{Category, Mechanic, RecommendedPlayers, Tag, TagSet};

/// Entries below this percentage are not reported.
pub const MIN_VISIBLE_PERCENTAGE: f64 = 30.0;
/// Entries at or above this percentage are highlighted.
pub const HIGHLIGHT_PERCENTAGE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPriority {
    Highlight,
    Normal,
    Hidden,
}

impl DisplayPriority {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage < MIN_VISIBLE_PERCENTAGE {
            Self::Hidden
        } else if percentage >= HIGHLIGHT_PERCENTAGE {
            Self::Highlight
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagVote {
    pub name: &'static str,
    pub review_votes: usize,
    pub total_reviews: usize,
    pub percentage: f64,
    pub display_priority: DisplayPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTagStats {
    pub mechanics: Vec<TagVote>,
    pub categories: Vec<TagVote>,
    pub player_counts: Vec<TagVote>,
}

impl GameTagStats {
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.mechanics.len() + self.categories.len() + self.player_counts.len()
    }
}

/// Tally the reviews of a single game.
#[must_use]
pub fn tally(reviews: &[ReviewRecord]) -> GameTagStats {
    GameTagStats {
        mechanics: tally_catalogue::<Mechanic>(reviews, |r| r.mechanics),
        categories: tally_catalogue::<Category>(reviews, |r| r.categories),
        player_counts: tally_catalogue::<RecommendedPlayers>(reviews, |r| r.recommended_players),
    }
}

#[allow(clippy::cast_precision_loss)]
fn tally_catalogue<T: Tag>(
    reviews: &[ReviewRecord],
    tags_of: impl Fn(&ReviewRecord) -> TagSet<T>,
) -> Vec<TagVote> {
    let total_reviews = reviews.len();
    if total_reviews == 0 {
        return Vec::new();
    }

    let mut votes: Vec<TagVote> = T::ALL
        .iter()
        .map(|tag| {
            let review_votes = reviews.iter().filter(|&r| tags_of(r).contains(*tag)).count();
            let percentage = (review_votes as f64 / total_reviews as f64 * 100.0).round();
            TagVote {
                name: tag.label(),
                review_votes,
                total_reviews,
                percentage,
                display_priority: DisplayPriority::for_percentage(percentage),
            }
        })
        .filter(|vote| vote.percentage >= MIN_VISIBLE_PERCENTAGE)
        .collect();

    votes.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    votes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::aggregate::fixtures::review;

    #[test]
    fn priority_thresholds() {
        assert_eq!(DisplayPriority::for_percentage(25.0), DisplayPriority::Hidden);
        assert_eq!(DisplayPriority::for_percentage(30.0), DisplayPriority::Normal);
        assert_eq!(DisplayPriority::for_percentage(69.9), DisplayPriority::Normal);
        assert_eq!(DisplayPriority::for_percentage(70.0), DisplayPriority::Highlight);
        assert_eq!(DisplayPriority::for_percentage(100.0), DisplayPriority::Highlight);
    }

    #[test]
    fn counts_votes_and_drops_rare_tags() {
        let mut reviews = vec![review(1, Some(7.0)), review(1, Some(8.0)), review(1, Some(6.0))];
        reviews[0].mechanics = [Mechanic::Drafting, Mechanic::Auction].into_iter().collect();
        reviews[1].mechanics = [Mechanic::Drafting, Mechanic::SetCollection]
            .into_iter()
            .collect();
        reviews[2].mechanics = std::iter::once(Mechanic::Drafting).collect();
        for r in &mut reviews[..2] {
            r.recommended_players = std::iter::once(RecommendedPlayers::Four).collect();
        }

        let stats = tally(&reviews);

        let drafting = &stats.mechanics[0];
        assert_eq!(drafting.name, "ドラフト");
        assert_eq!(drafting.review_votes, 3);
        assert!((drafting.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(drafting.display_priority, DisplayPriority::Highlight);

        // One vote in three rounds to 33%.
        assert_eq!(stats.mechanics.len(), 3);
        assert!(stats.mechanics[1..].iter().all(|v| (v.percentage - 33.0).abs() < f64::EPSILON));

        let four = &stats.player_counts[0];
        assert_eq!(four.name, "4人");
        assert!((four.percentage - 67.0).abs() < f64::EPSILON);
        assert_eq!(four.display_priority, DisplayPriority::Normal);

        assert!(stats.categories.is_empty());
        assert_eq!(stats.total_items(), 4);
    }

    #[test]
    fn tags_below_thirty_percent_are_hidden() {
        let mut reviews: Vec<ReviewRecord> = (0..4).map(|_| review(1, Some(5.0))).collect();
        reviews[0].categories = std::iter::once(Category::Party).collect();

        let stats = tally(&reviews);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn no_reviews_no_stats() {
        assert_eq!(tally(&[]).total_items(), 0);
    }
}
