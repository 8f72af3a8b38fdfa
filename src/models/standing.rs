//! Leaderboard standing models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's precomputed point totals, supplied as input to aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Username (unique within one aggregation call)
    pub username: String,

    /// Total points across all bets
    pub total_points: i32,

    /// Points earned during the group phase
    pub group_points: i32,
}

impl Standing {
    /// Create a new standing.
    pub fn new(username: impl Into<String>, total_points: i32, group_points: i32) -> Self {
        Self {
            username: username.into(),
            total_points,
            group_points,
        }
    }
}

/// A standing enriched with bonus points and winner-category flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedStanding {
    /// Username carried over from the base standing
    pub username: String,

    /// Total points across all bets
    pub total_points: i32,

    /// Points earned during the group phase
    pub group_points: i32,

    /// The configured favorite country (same value on every row)
    pub favorite_country: String,

    /// Points for the favorite country; `None` when the user has no recorded
    /// score for it (distinct from zero)
    pub favorite_country_points: Option<i32>,

    /// Extra-bet points; `None` when the user placed no extra bet
    pub extra_bet_points: Option<i32>,

    /// Ties the lowest total
    pub min_points_candidate: bool,

    /// Ties the highest total
    pub max_points_candidate: bool,

    /// Ties the highest group-phase total
    pub max_group_points_candidate: bool,

    /// Ties the highest favorite-country bonus
    pub max_country_points_candidate: bool,
}

impl AnnotatedStanding {
    /// Whether this row wins (or ties) any category at all.
    pub fn is_flagged(&self) -> bool {
        self.min_points_candidate
            || self.max_points_candidate
            || self.max_group_points_candidate
            || self.max_country_points_candidate
    }
}

/// A computed leaderboard: the annotated rows plus when they were computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsReport {
    /// The favorite country the rows were annotated against
    pub favorite_country: String,

    /// When this report was computed
    pub computed_at: DateTime<Utc>,

    /// Annotated rows, in base-standings order
    pub rows: Vec<AnnotatedStanding>,
}

impl StandingsReport {
    /// Create a new report stamped with the current time.
    pub fn new(favorite_country: impl Into<String>, rows: Vec<AnnotatedStanding>) -> Self {
        Self {
            favorite_country: favorite_country.into(),
            computed_at: Utc::now(),
            rows,
        }
    }

    /// Get a row by username.
    pub fn get_user(&self, username: &str) -> Option<&AnnotatedStanding> {
        self.rows.iter().find(|r| r.username == username)
    }

    /// Rows tying the highest total.
    pub fn max_points_candidates(&self) -> Vec<&AnnotatedStanding> {
        self.rows.iter().filter(|r| r.max_points_candidate).collect()
    }

    /// Rows tying the lowest total.
    pub fn min_points_candidates(&self) -> Vec<&AnnotatedStanding> {
        self.rows.iter().filter(|r| r.min_points_candidate).collect()
    }

    /// Rows tying the highest group-phase total.
    pub fn max_group_points_candidates(&self) -> Vec<&AnnotatedStanding> {
        self.rows
            .iter()
            .filter(|r| r.max_group_points_candidate)
            .collect()
    }

    /// Rows tying the highest favorite-country bonus.
    pub fn max_country_points_candidates(&self) -> Vec<&AnnotatedStanding> {
        self.rows
            .iter()
            .filter(|r| r.max_country_points_candidate)
            .collect()
    }
}
