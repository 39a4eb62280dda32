//! Report delivery layer for the traffic report tool.
//!
//! A finished [`Report`] is handed to a [`ReportSink`], which owns
//! transport, authentication and delivery confirmation. The production sink
//! posts to a Telegram channel; the stdout sink backs dry runs.

use async_trait::async_trait;
use thiserror::Error;

pub mod stdout;
pub mod telegram;

/// A rendered report ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Final report body, lines joined with newlines.
    pub body: String,
    /// Whether `body` contains HTML markup the channel should interpret.
    pub html: bool,
}

/// Errors raised by report sinks.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to deliver report: {0}")]
    DeliveryFailed(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A delivery channel for finished reports.
#[async_trait]
pub trait ReportSink {
    /// Deliver one report. Callers treat failures as fatal for the current
    /// run; retry policy belongs to whoever schedules runs.
    async fn deliver(&self, report: &Report) -> Result<(), SinkError>;
}
