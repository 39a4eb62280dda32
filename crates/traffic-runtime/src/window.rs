//! Derivation of the rolling daily accounting window.
//!
//! The engine only consumes a concrete `(start, end]` interval; this module
//! is the policy the binary uses to pick one. It is a pure function of the
//! supplied clock value, so scheduling remains the caller's concern.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use traffic_core::error::Result;
use traffic_core::models::AccountingWindow;

/// A report issued less than this long after midnight is attributed to the
/// previous day, so an early run still covers a full accounting day.
const FULL_DAY_CUTOFF_MINUTES: i64 = 23 * 60 + 30;

/// Compute the rolling 24-hour accounting window for a report issued at
/// `now` (UTC).
///
/// The window starts at the most recent UTC midnight that lies at least
/// 23 h 30 m in the past and spans exactly one day.
pub fn rolling_day(now: DateTime<Utc>) -> Result<AccountingWindow> {
    let cutoff = Duration::minutes(FULL_DAY_CUTOFF_MINUTES);

    let mut start_date = now.date_naive();
    let elapsed = now.naive_utc() - start_date.and_time(NaiveTime::MIN);
    if elapsed < cutoff {
        start_date = (now - cutoff).date_naive();
    }

    let start = Utc.from_utc_datetime(&start_date.and_time(NaiveTime::MIN));
    let end = start + Duration::days(1);

    AccountingWindow::new(start, end)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
