//! # Betpool
//!
//! A betting pool standings tracker with multi-category winner detection.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (standings, extra bets, country scores)
//! - **calculate**: The standings aggregation engine
//! - **sources**: Input-source boundary and implementations
//! - **storage**: JSONL input and export files
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod sources;
pub mod storage;

pub use models::*;
