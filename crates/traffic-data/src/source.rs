//! Record and identity retrieval from the MySQL store.
//!
//! The engine consumes rows through the narrow [`RecordSource`] and
//! [`IdentityLookup`] traits; the `MySql*` implementations here are the
//! production backends. Pool lifecycle is owned by the caller — construct
//! before the run, release after.

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

use traffic_core::error::{ReportError, Result};
use traffic_core::models::{AccountingWindow, RawUsageRow, UsageRecord, UserIdentity};

// ── Boundary traits ───────────────────────────────────────────────────────────

/// A source of usage records for a caller-specified accounting window.
#[async_trait]
pub trait RecordSource {
    /// Fetch every record whose log time falls within the half-open
    /// `(start, end]` window. A row whose quantity cannot be decoded fails
    /// the whole fetch.
    async fn fetch(&self, window: &AccountingWindow) -> Result<Vec<UsageRecord>>;
}

/// Resolution from a numeric user id to a display identity.
#[async_trait]
pub trait IdentityLookup {
    /// Look up one user; `Ok(None)` when the id has no identity row.
    async fn resolve(&self, user_id: i64) -> Result<Option<UserIdentity>>;
}

// ── MySQL record source ───────────────────────────────────────────────────────

/// Record source backed by the `user_traffic_log` table.
pub struct MySqlRecordSource {
    pool: MySqlPool,
}

impl MySqlRecordSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Row shape returned by the traffic-log query. `traffic` stays textual
/// until [`UsageRecord::from_raw`] decodes it.
#[derive(sqlx::FromRow)]
struct TrafficLogRow {
    id: i64,
    user_id: i64,
    u: i64,
    d: i64,
    node_id: i64,
    rate: i64,
    traffic: String,
    log_time: i64,
}

impl From<TrafficLogRow> for RawUsageRow {
    fn from(row: TrafficLogRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            upload: row.u,
            download: row.d,
            node_id: row.node_id,
            rate: row.rate,
            traffic: row.traffic,
            log_time: row.log_time,
        }
    }
}

#[async_trait]
impl RecordSource for MySqlRecordSource {
    async fn fetch(&self, window: &AccountingWindow) -> Result<Vec<UsageRecord>> {
        let rows = sqlx::query_as::<_, TrafficLogRow>(
            "SELECT id, user_id, u, d, node_id, rate, traffic, log_time \
             FROM user_traffic_log \
             WHERE log_time > ? AND log_time <= ? \
             ORDER BY log_time DESC",
        )
        .bind(window.start().timestamp())
        .bind(window.end().timestamp())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ReportError::Database(e.into()))?;

        debug!("fetched {} traffic-log rows", rows.len());

        rows.into_iter()
            .map(|row| UsageRecord::from_raw(row.into()))
            .collect()
    }
}

// ── MySQL identity lookup ─────────────────────────────────────────────────────

/// Identity lookup backed by the `user` table.
pub struct MySqlIdentityLookup {
    pool: MySqlPool,
}

impl MySqlIdentityLookup {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    user_name: String,
}

#[async_trait]
impl IdentityLookup for MySqlIdentityLookup {
    async fn resolve(&self, user_id: i64) -> Result<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, user_name FROM user WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ReportError::Database(e.into()))?;

        Ok(row.map(|r| UserIdentity {
            user_id: r.id,
            display_name: r.user_name,
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
