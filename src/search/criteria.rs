//! Search criteria parsed from the query string.
//!
//! Parsing never fails: unparseable numbers are treated as absent, the same way
//! an omitted parameter is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::tags::{Category, Mechanic, Tag, TagSet};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;

/// The five rating axes a review can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingAxis {
    Overall,
    RuleComplexity,
    LuckFactor,
    Interaction,
    Downtime,
}

impl RatingAxis {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Overall,
        Self::RuleComplexity,
        Self::LuckFactor,
        Self::Interaction,
        Self::Downtime,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Query parameter stem; bounds are `<stem>Min` and `<stem>Max`.
    #[must_use]
    pub const fn param_stem(self) -> &'static str {
        match self {
            Self::Overall => "overallScore",
            Self::RuleComplexity => "ruleComplexity",
            Self::LuckFactor => "luckFactor",
            Self::Interaction => "interaction",
            Self::Downtime => "downtime",
        }
    }
}

/// Inclusive numeric range where either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Metric the result list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    OverallScore,
    RuleComplexity,
    LuckFactor,
    Interaction,
    Downtime,
    ReviewCount,
}

impl SortKey {
    /// Unknown or missing keys fall back to the overall score.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("rule_complexity") => Self::RuleComplexity,
            Some("luck_factor") => Self::LuckFactor,
            Some("interaction") => Self::Interaction,
            Some("downtime") => Self::Downtime,
            Some("review_count") => Self::ReviewCount,
            _ => Self::OverallScore,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `asc` sorts descending.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// Tags a game must carry, all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredTags<T: Tag> {
    names: Vec<String>,
    /// `None` when a requested name is not in the catalogue.
    resolved: Option<TagSet<T>>,
}

impl<T: Tag> RequiredTags<T> {
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        let resolved = names
            .iter()
            .map(|name| T::parse(name))
            .collect::<Option<TagSet<T>>>();

        if resolved.is_none() {
            tracing::debug!(?names, "search requested a tag outside the catalogue");
        }

        Self { names, resolved }
    }

    #[must_use]
    pub fn none() -> Self {
        Self::from_names(Vec::new())
    }

    /// Names as requested, echoed back to the caller.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_satisfied_by(&self, tags: TagSet<T>) -> bool {
        if self.names.is_empty() {
            return true;
        }
        self.resolved
            .is_some_and(|required| tags.is_superset(required))
    }
}

/// Resolved search filters, sort and page for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub axis_bounds: [Bounds; RatingAxis::COUNT],
    /// Player counts the game itself must support (any of them).
    pub game_player_counts: Vec<i32>,
    /// Player counts reviewers must recommend (any of them).
    pub recommended_player_counts: Vec<i32>,
    pub play_time: Bounds,
    pub mechanics: RequiredTags<Mechanic>,
    pub categories: RequiredTags<Category>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: None,
            axis_bounds: [Bounds::default(); RatingAxis::COUNT],
            game_player_counts: Vec::new(),
            recommended_player_counts: Vec::new(),
            play_time: Bounds::default(),
            mechanics: RequiredTags::none(),
            categories: RequiredTags::none(),
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterCriteria {
    /// Build criteria from decoded query-string pairs.
    ///
    /// Single-valued keys use their first occurrence. `limit` is capped at
    /// `max_limit`.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)], max_limit: u64) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        let all = |key: &str| {
            pairs
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
        };
        let bounds = |stem: &str| {
            Bounds::new(
                parse_bound(first(&format!("{stem}Min"))),
                parse_bound(first(&format!("{stem}Max"))),
            )
        };

        let axis_bounds = RatingAxis::ALL.map(|axis| bounds(axis.param_stem()));

        Self {
            query: first("query")
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            axis_bounds,
            game_player_counts: parse_counts(&all("gamePlayerCounts")),
            recommended_player_counts: parse_counts(&all("recommendedPlayerCounts")),
            play_time: bounds("playTime"),
            mechanics: RequiredTags::from_names(parse_names(&all("mechanics"))),
            categories: RequiredTags::from_names(parse_names(&all("categories"))),
            sort_by: SortKey::parse(first("sortBy")),
            sort_order: SortOrder::parse(first("sortOrder")),
            page: parse_positive(first("page")).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(first("limit"))
                .unwrap_or(DEFAULT_LIMIT)
                .min(max_limit.max(1)),
        }
    }

    #[must_use]
    pub const fn bounds(&self, axis: RatingAxis) -> &Bounds {
        &self.axis_bounds[axis.index()]
    }

    /// Echo of the resolved filters for the response envelope.
    ///
    /// Open bounds are omitted; list filters are always present.
    #[must_use]
    pub fn echo(&self) -> Value {
        let mut map = Map::new();

        if let Some(query) = &self.query {
            map.insert("query".to_string(), json!(query));
        }
        for axis in RatingAxis::ALL {
            insert_bounds(&mut map, axis.param_stem(), self.bounds(axis));
        }
        map.insert(
            "gamePlayerCounts".to_string(),
            json!(self.game_player_counts),
        );
        map.insert(
            "recommendedPlayerCounts".to_string(),
            json!(self.recommended_player_counts),
        );
        insert_bounds(&mut map, "playTime", &self.play_time);
        map.insert("mechanics".to_string(), json!(self.mechanics.names()));
        map.insert("categories".to_string(), json!(self.categories.names()));
        map.insert("sortBy".to_string(), json!(self.sort_by));
        map.insert("sortOrder".to_string(), json!(self.sort_order));
        map.insert("page".to_string(), json!(self.page));
        map.insert("limit".to_string(), json!(self.limit));

        Value::Object(map)
    }
}

fn insert_bounds(map: &mut Map<String, Value>, stem: &str, bounds: &Bounds) {
    if let Some(min) = bounds.min {
        map.insert(format!("{stem}Min"), json!(min));
    }
    if let Some(max) = bounds.max {
        map.insert(format!("{stem}Max"), json!(max));
    }
}

/// Parse a finite number, ignoring surrounding whitespace.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A range bound; unparseable input and `0` both mean "no bound".
fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_number).filter(|v| *v != 0.0)
}

/// Page or page size: whole numbers of at least 1, fractions truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(parse_number)
        .map(f64::trunc)
        .filter(|v| *v >= 1.0)
        .map(|v| v.min(u64::MAX as f64) as u64)
}

/// Whole-number player counts; anything else can never match and is dropped.
#[allow(clippy::cast_possible_truncation)]
fn parse_counts(raw: &[&str]) -> Vec<i32> {
    raw.iter()
        .filter_map(|value| parse_number(value))
        .filter(|v| v.fract() == 0.0 && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
        .map(|v| v as i32)
        .collect()
}

fn parse_names(raw: &[&str]) -> Vec<String> {
    raw.iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
