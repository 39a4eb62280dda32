use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::quantity::parse_quantity;

// ── Raw rows and usage records ────────────────────────────────────────────────

/// Field values of one raw traffic-log row, prior to quantity decoding.
///
/// The data layer builds these from whatever shape the store returns; the
/// textual `traffic` field has not been interpreted yet.
#[derive(Debug, Clone)]
pub struct RawUsageRow {
    /// Unique identifier of the source row.
    pub id: i64,
    /// Foreign key to the user identity.
    pub user_id: i64,
    /// Upload bytes recorded for the period captured in this row.
    pub upload: i64,
    /// Download bytes recorded for the period captured in this row.
    pub download: i64,
    /// Relay node that produced the row.
    pub node_id: i64,
    /// Multiplier applied upstream before the row was recorded.
    pub rate: i64,
    /// Textual traffic quantity, e.g. `"12.5MB"`.
    pub traffic: String,
    /// Unix timestamp when the row was recorded.
    pub log_time: i64,
}

/// An immutable usage record parsed from one raw traffic-log row.
///
/// `traffic` is the authoritative usage amount for the row; `upload`,
/// `download`, `node_id` and `rate` are carried for completeness and never
/// reinterpreted by the accounting engine.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub record_id: i64,
    pub user_id: i64,
    pub upload: i64,
    pub download: i64,
    pub node_id: i64,
    pub rate: i64,
    /// Byte count decoded from the row's textual quantity. Always `>= 0`.
    pub traffic: f64,
    pub log_time: i64,
}

impl UsageRecord {
    /// Decode a raw row into a usage record.
    ///
    /// The textual quantity is parsed into bytes; a quantity that fails to
    /// parse or decodes to a negative value is a hard error for the row,
    /// never a silent zero.
    pub fn from_raw(raw: RawUsageRow) -> Result<Self> {
        let traffic = parse_quantity(&raw.traffic)?;
        if traffic < 0.0 {
            return Err(ReportError::MalformedQuantity {
                quantity: raw.traffic,
                reason: "quantity is negative".to_string(),
            });
        }

        Ok(Self {
            record_id: raw.id,
            user_id: raw.user_id,
            upload: raw.upload,
            download: raw.download,
            node_id: raw.node_id,
            rate: raw.rate,
            traffic,
            log_time: raw.log_time,
        })
    }
}

// ── Identities and leaderboard entries ────────────────────────────────────────

/// An externally resolved user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
    pub display_name: String,
}

/// One ranked leaderboard position: a user and their window total.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub total_bytes: f64,
}

// ── Accounting window ─────────────────────────────────────────────────────────

/// The half-open `(start, end]` interval over which usage is summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AccountingWindow {
    /// Create a window, rejecting any interval whose start does not precede
    /// its end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ReportError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Exclusive lower bound.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

// ── Name markup ───────────────────────────────────────────────────────────────

/// How display names are wrapped in rendered report lines.
///
/// A presentation detail of the destination channel; selectable without
/// touching aggregation logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameMarkup {
    /// Wrap names in `<code>` tags for HTML-capable channels.
    #[default]
    Html,
    /// No wrapping, plain text.
    Plain,
}

impl NameMarkup {
    /// Wrap a display name for this markup mode.
    ///
    /// HTML mode escapes the name so user-controlled text cannot break the
    /// surrounding markup.
    pub fn wrap(&self, name: &str) -> String {
        match self {
            NameMarkup::Html => format!("<code>{}</code>", escape_html(name)),
            NameMarkup::Plain => name.to_string(),
        }
    }
}

/// Escape the characters HTML treats specially: `&`, `<`, `>`.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ── Tests ─────────────────────────────────────────────────────────────────────
