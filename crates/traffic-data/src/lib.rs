//! Data access layer for the traffic report tool.
//!
//! Fetches raw traffic-log rows and user identities from the relational
//! store, folds records into per-user totals, and selects the leaderboard.

pub mod aggregator;
pub mod leaderboard;
pub mod source;

pub use traffic_core as core;
