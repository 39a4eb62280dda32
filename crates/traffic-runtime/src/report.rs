//! Report rendering and the end-to-end report run.
//!
//! One run is fully materialized and sequential: fetch every record in the
//! window, aggregate, select the leaderboard, resolve identities, render,
//! deliver. Any parse or lookup failure aborts the run — there is no
//! partial report. Concurrent runs must be serialized by the caller.

use tracing::{debug, info};

use traffic_core::error::{ReportError, Result};
use traffic_core::models::{AccountingWindow, LeaderboardEntry, NameMarkup, UserIdentity};
use traffic_core::quantity::format_quantity;
use traffic_data::aggregator::aggregate;
use traffic_data::leaderboard::select_top;
use traffic_data::source::{IdentityLookup, RecordSource};
use traffic_delivery::{Report, ReportSink};

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render leaderboard entries into display lines, resolving each identity
/// through `identities`.
///
/// A lookup miss is fatal for the report — substituting a placeholder name
/// would misattribute usage to an unintended label.
pub async fn render(
    entries: &[LeaderboardEntry],
    identities: &dyn IdentityLookup,
    markup: NameMarkup,
) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        let identity = identities
            .resolve(entry.user_id)
            .await?
            .ok_or(ReportError::IdentityNotFound(entry.user_id))?;
        lines.push(render_line(entry, &identity, markup));
    }
    Ok(lines)
}

/// One display line: user id, wrapped display name, formatted quantity.
fn render_line(entry: &LeaderboardEntry, identity: &UserIdentity, markup: NameMarkup) -> String {
    format!(
        "{}, {}, {}",
        entry.user_id,
        markup.wrap(&identity.display_name),
        format_quantity(entry.total_bytes)
    )
}

// ── ReportRunner ──────────────────────────────────────────────────────────────

/// Orchestrates one report run over a concrete accounting window.
///
/// Collaborator handles are borrowed from the caller, which owns their
/// lifecycle — constructed before the run, released after.
pub struct ReportRunner<'a> {
    records: &'a dyn RecordSource,
    identities: &'a dyn IdentityLookup,
    sink: &'a dyn ReportSink,
    top: usize,
    markup: NameMarkup,
}

impl<'a> ReportRunner<'a> {
    pub fn new(
        records: &'a dyn RecordSource,
        identities: &'a dyn IdentityLookup,
        sink: &'a dyn ReportSink,
        top: usize,
        markup: NameMarkup,
    ) -> Self {
        Self {
            records,
            identities,
            sink,
            top,
            markup,
        }
    }

    /// Run one report: fetch, aggregate, select, render, deliver.
    ///
    /// An empty window is not an error: the rendered body is empty and
    /// delivery is skipped. Returns the report either way.
    pub async fn run(&self, window: &AccountingWindow) -> Result<Report> {
        info!(
            "running traffic report for window {} .. {}",
            window.start(),
            window.end()
        );

        let records = self.records.fetch(window).await?;
        debug!("aggregating {} usage records", records.len());

        let totals = aggregate(&records);
        let entries = select_top(&totals, self.top);
        let lines = render(&entries, self.identities, self.markup).await?;

        let report = Report {
            body: lines.join("\n"),
            html: self.markup == NameMarkup::Html,
        };

        if report.body.is_empty() {
            info!("no usage recorded in the accounting window; skipping delivery");
            return Ok(report);
        }

        self.sink
            .deliver(&report)
            .await
            .map_err(|e| ReportError::Delivery(e.into()))?;
        info!("report delivered ({} entries)", entries.len());

        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
