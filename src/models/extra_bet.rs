//! Extra-bet model.

use serde::{Deserialize, Serialize};

/// An ad-hoc bonus-point record, outside the regular match scoring.
///
/// A user may have several records; aggregation keeps the last one seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraBet {
    /// Username the bonus belongs to
    pub username: String,

    /// Bonus points awarded
    pub points: i32,
}

impl ExtraBet {
    /// Create a new extra-bet record.
    pub fn new(username: impl Into<String>, points: i32) -> Self {
        Self {
            username: username.into(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_bet_creation() {
        let bet = ExtraBet::new("dave", 5);
        assert_eq!(bet.username, "dave");
        assert_eq!(bet.points, 5);
    }

    #[test]
    fn test_extra_bet_serialization() {
        let bet = ExtraBet::new("dave", 5);

        let json = serde_json::to_string(&bet).unwrap();
        let deserialized: ExtraBet = serde_json::from_str(&json).unwrap();

        assert_eq!(bet, deserialized);
    }
}
