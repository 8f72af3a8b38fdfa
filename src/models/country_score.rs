//! Per-country bonus score model.

use serde::{Deserialize, Serialize};

/// A user's bonus points for one country.
///
/// Aggregation only consumes the rows matching the configured favorite
/// country; rows for other countries are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryScore {
    /// Username the score belongs to
    pub username: String,

    /// Country the points were earned for
    pub country: String,

    /// Bonus points
    pub points: i32,
}

impl CountryScore {
    /// Create a new country score.
    pub fn new(username: impl Into<String>, country: impl Into<String>, points: i32) -> Self {
        Self {
            username: username.into(),
            country: country.into(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_score_creation() {
        let score = CountryScore::new("alice", "Germany", 3);
        assert_eq!(score.username, "alice");
        assert_eq!(score.country, "Germany");
        assert_eq!(score.points, 3);
    }

    #[test]
    fn test_country_score_serialization() {
        let score = CountryScore::new("alice", "Germany", 3);

        let json = serde_json::to_string(&score).unwrap();
        let deserialized: CountryScore = serde_json::from_str(&json).unwrap();

        assert_eq!(score, deserialized);
    }
}
