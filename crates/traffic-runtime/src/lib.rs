//! Runtime orchestration layer for the traffic report tool.
//!
//! Renders leaderboards into report lines, runs the end-to-end report
//! pipeline against the configured collaborators, and derives the rolling
//! daily accounting window.

pub mod report;
pub mod window;

pub use traffic_core as core;
pub use traffic_data as data;
