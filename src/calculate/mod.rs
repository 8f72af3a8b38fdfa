//! Standings aggregation engine.
//!
//! Merges base standings with favorite-country bonus points and extra-bet
//! points, and flags each row for the winner categories it ties:
//! - lowest and highest total points
//! - highest group-phase points
//! - highest favorite-country bonus

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::models::{AnnotatedStanding, ExtraBet, Standing};
use crate::sources::SourceError;

/// Errors that can occur while computing standings.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("favorite country must be configured")]
    MissingFavoriteCountry,

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Scalar extrema of the base standings, computed in the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub min_points: i32,
    pub max_points: i32,
    pub max_group_points: i32,
}

impl Default for Extrema {
    fn default() -> Self {
        Self {
            min_points: i32::MAX,
            max_points: 0,
            max_group_points: 0,
        }
    }
}

/// Fold the base standings into their scalar extrema.
///
/// An empty input leaves the seeds untouched, so no later row can match them.
pub fn compute_extrema(standings: &[Standing]) -> Extrema {
    let mut extrema = Extrema::default();

    for standing in standings {
        extrema.min_points = extrema.min_points.min(standing.total_points);
        extrema.max_points = extrema.max_points.max(standing.total_points);
        extrema.max_group_points = extrema.max_group_points.max(standing.group_points);
    }

    extrema
}

/// Reduce extra-bet records into points per user.
///
/// The last record seen for a username wins; values are replaced, not summed.
pub fn extra_bets_by_user(extra_bets: &[ExtraBet]) -> HashMap<String, i32> {
    let mut points = HashMap::new();

    for bet in extra_bets {
        points.insert(bet.username.clone(), bet.points);
    }

    points
}

/// The aggregation engine, fixed to one favorite country at construction.
#[derive(Debug, Clone)]
pub struct StandingsEngine {
    favorite_country: String,
}

impl StandingsEngine {
    /// Create an engine for the given favorite country.
    ///
    /// The favorite country is a per-deployment setting; an empty or
    /// whitespace-only value fails here, before any aggregation runs.
    pub fn new(favorite_country: impl Into<String>) -> Result<Self, EngineError> {
        let favorite_country = favorite_country.into();
        if favorite_country.trim().is_empty() {
            return Err(EngineError::MissingFavoriteCountry);
        }

        Ok(Self { favorite_country })
    }

    /// The configured favorite country.
    pub fn favorite_country(&self) -> &str {
        &self.favorite_country
    }

    /// Annotate base standings with bonus points and candidate flags.
    ///
    /// Output rows keep the input order. Ties are not broken: every row
    /// matching an extremum is flagged for that category. A username missing
    /// from an auxiliary map gets `None` for that field, never zero.
    pub fn annotate(
        &self,
        standings: Vec<Standing>,
        country_points: &HashMap<String, i32>,
        extra_bets: &[ExtraBet],
    ) -> Vec<AnnotatedStanding> {
        let extra_points = extra_bets_by_user(extra_bets);
        let max_country_points = country_points.values().copied().max();
        let extrema = compute_extrema(&standings);

        debug!(
            rows = standings.len(),
            ?extrema,
            "annotating standings against {}",
            self.favorite_country
        );

        standings
            .into_iter()
            .map(|standing| {
                let favorite_country_points = country_points.get(&standing.username).copied();

                AnnotatedStanding {
                    favorite_country: self.favorite_country.clone(),
                    favorite_country_points,
                    extra_bet_points: extra_points.get(&standing.username).copied(),
                    min_points_candidate: standing.total_points == extrema.min_points,
                    max_points_candidate: standing.total_points == extrema.max_points,
                    max_group_points_candidate: standing.group_points == extrema.max_group_points,
                    max_country_points_candidate: favorite_country_points.is_some()
                        && favorite_country_points == max_country_points,
                    username: standing.username,
                    total_points: standing.total_points,
                    group_points: standing.group_points,
                }
            })
            .collect()
    }
}
