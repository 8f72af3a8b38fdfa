//! Input-source boundary.
//!
//! The aggregation engine pulls its three inputs (base standings, per-country
//! bonus points, extra bets) through the traits defined here. Implementations
//! include JSONL-file-backed sources and an in-memory source for tests and
//! embedders.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::calculate::{EngineError, StandingsEngine};
use crate::models::{AnnotatedStanding, CountryScore, ExtraBet, Standing, StandingsReport};
use crate::storage::StorageError;

mod jsonl;

pub use jsonl::JsonlSources;

/// Errors that can occur while reading input data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Supplies the base standings, one per user, in leaderboard order.
pub trait StandingsSource: Send + Sync {
    fn standings(&self) -> Result<Vec<Standing>, SourceError>;
}

/// Supplies per-user bonus points for one country.
pub trait CountryPointsSource: Send + Sync {
    fn points_for_country(&self, country: &str) -> Result<HashMap<String, i32>, SourceError>;
}

/// Supplies extra-bet records, possibly several per user.
pub trait ExtraBetSource: Send + Sync {
    fn extra_bets(&self) -> Result<Vec<ExtraBet>, SourceError>;
}

/// Computes annotated standings by pulling fresh inputs from its sources.
///
/// The favorite country is validated at construction; each call reads the
/// sources anew and runs one aggregation pass over the result.
pub struct StandingsService {
    engine: StandingsEngine,
    standings: Arc<dyn StandingsSource>,
    country_points: Arc<dyn CountryPointsSource>,
    extra_bets: Arc<dyn ExtraBetSource>,
}

impl StandingsService {
    /// Create a service for the given favorite country and sources.
    pub fn new(
        favorite_country: impl Into<String>,
        standings: Arc<dyn StandingsSource>,
        country_points: Arc<dyn CountryPointsSource>,
        extra_bets: Arc<dyn ExtraBetSource>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            engine: StandingsEngine::new(favorite_country)?,
            standings,
            country_points,
            extra_bets,
        })
    }

    /// The configured favorite country.
    pub fn favorite_country(&self) -> &str {
        self.engine.favorite_country()
    }

    /// Pull the three inputs and compute the annotated standings.
    pub fn compute_standings(&self) -> Result<Vec<AnnotatedStanding>, EngineError> {
        let standings = self.standings.standings()?;
        let country_points = self
            .country_points
            .points_for_country(self.engine.favorite_country())?;
        let extra_bets = self.extra_bets.extra_bets()?;

        info!(
            rows = standings.len(),
            country_entries = country_points.len(),
            extra_bets = extra_bets.len(),
            "computing standings"
        );

        Ok(self.engine.annotate(standings, &country_points, &extra_bets))
    }

    /// Compute the standings wrapped in a timestamped report.
    pub fn report(&self) -> Result<StandingsReport, EngineError> {
        let rows = self.compute_standings()?;
        Ok(StandingsReport::new(self.engine.favorite_country(), rows))
    }
}

/// Fixed in-memory input data, implementing all three source traits.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub standings: Vec<Standing>,
    pub country_scores: Vec<CountryScore>,
    pub extra_bets: Vec<ExtraBet>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_standings(mut self, standings: Vec<Standing>) -> Self {
        self.standings = standings;
        self
    }

    pub fn with_country_scores(mut self, country_scores: Vec<CountryScore>) -> Self {
        self.country_scores = country_scores;
        self
    }

    pub fn with_extra_bets(mut self, extra_bets: Vec<ExtraBet>) -> Self {
        self.extra_bets = extra_bets;
        self
    }
}

impl StandingsSource for MemorySource {
    fn standings(&self) -> Result<Vec<Standing>, SourceError> {
        Ok(self.standings.clone())
    }
}

impl CountryPointsSource for MemorySource {
    fn points_for_country(&self, country: &str) -> Result<HashMap<String, i32>, SourceError> {
        Ok(points_by_user(&self.country_scores, country))
    }
}

impl ExtraBetSource for MemorySource {
    fn extra_bets(&self) -> Result<Vec<ExtraBet>, SourceError> {
        Ok(self.extra_bets.clone())
    }
}

/// Filter country scores to one country and key them by username.
///
/// Country names compare case-insensitively; a later row for the same user
/// replaces an earlier one.
pub(crate) fn points_by_user(scores: &[CountryScore], country: &str) -> HashMap<String, i32> {
    let mut points = HashMap::new();

    for score in scores {
        if score.country.eq_ignore_ascii_case(country) {
            points.insert(score.username.clone(), score.points);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(source: MemorySource) -> StandingsService {
        let source = Arc::new(source);
        StandingsService::new(
            "Germany",
            source.clone(),
            source.clone(),
            source,
        )
        .unwrap()
    }

    #[test]
    fn test_service_rejects_empty_country() {
        let source = Arc::new(MemorySource::new());
        let result = StandingsService::new("", source.clone(), source.clone(), source);
        assert!(matches!(result, Err(EngineError::MissingFavoriteCountry)));
    }

    #[test]
    fn test_service_computes_over_memory_source() {
        let source = MemorySource::new()
            .with_standings(vec![
                Standing::new("alice", 10, 5),
                Standing::new("bob", 7, 5),
                Standing::new("carol", 10, 3),
            ])
            .with_country_scores(vec![
                CountryScore::new("alice", "Germany", 3),
                CountryScore::new("bob", "Germany", 3),
                CountryScore::new("carol", "Germany", 1),
            ])
            .with_extra_bets(vec![ExtraBet::new("alice", 2)]);

        let rows = service(source).compute_standings().unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].max_points_candidate && rows[2].max_points_candidate);
        assert!(rows[1].min_points_candidate);
        assert!(rows[0].max_group_points_candidate && rows[1].max_group_points_candidate);
        assert!(rows[0].max_country_points_candidate && rows[1].max_country_points_candidate);
        assert_eq!(rows[0].extra_bet_points, Some(2));
        assert_eq!(rows[1].extra_bet_points, None);
    }

    #[test]
    fn test_service_ignores_other_countries() {
        let source = MemorySource::new()
            .with_standings(vec![Standing::new("alice", 10, 5)])
            .with_country_scores(vec![CountryScore::new("alice", "France", 9)]);

        let rows = service(source).compute_standings().unwrap();

        assert_eq!(rows[0].favorite_country_points, None);
        assert!(!rows[0].max_country_points_candidate);
    }

    #[test]
    fn test_service_report_wraps_rows() {
        let source = MemorySource::new().with_standings(vec![Standing::new("alice", 10, 5)]);

        let report = service(source).report().unwrap();

        assert_eq!(report.favorite_country, "Germany");
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn test_points_by_user_case_insensitive() {
        let scores = vec![
            CountryScore::new("alice", "germany", 3),
            CountryScore::new("bob", "GERMANY", 2),
        ];

        let points = points_by_user(&scores, "Germany");

        assert_eq!(points.get("alice"), Some(&3));
        assert_eq!(points.get("bob"), Some(&2));
    }

    #[test]
    fn test_points_by_user_later_row_replaces() {
        let scores = vec![
            CountryScore::new("alice", "Germany", 3),
            CountryScore::new("alice", "Germany", 7),
        ];

        let points = points_by_user(&scores, "Germany");

        assert_eq!(points.len(), 1);
        assert_eq!(points.get("alice"), Some(&7));
    }
}
