//! Core data models for the betting pool tracker.

mod country_score;
mod extra_bet;
mod standing;

pub use country_score::*;
pub use extra_bet::*;
pub use standing::*;
