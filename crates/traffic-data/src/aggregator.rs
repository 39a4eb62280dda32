//! Per-user accumulation of usage records.

use std::collections::HashMap;

use traffic_core::models::UsageRecord;

/// Fold records into a mapping from user id to total traffic bytes.
///
/// Every record contributes its `traffic` exactly once; a user's first
/// record initializes their entry. Accumulation is commutative, so permuting
/// the input changes totals only by floating-point summation error. An empty
/// input yields an empty map.
pub fn aggregate(records: &[UsageRecord]) -> HashMap<i64, f64> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for record in records {
        *totals.entry(record.user_id).or_insert(0.0) += record.traffic;
    }
    totals
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use traffic_core::models::{RawUsageRow, UsageRecord};

    fn make_record(user_id: i64, traffic: &str) -> UsageRecord {
        UsageRecord::from_raw(RawUsageRow {
            id: 1,
            user_id,
            upload: 0,
            download: 0,
            node_id: 1,
            rate: 1,
            traffic: traffic.to_string(),
            log_time: 1_700_000_000,
        })
        .expect("fixture quantity must parse")
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_single_user_sums_records() {
        let records = vec![
            make_record(1, "1K"),
            make_record(1, "512B"),
            make_record(1, "0.5K"),
        ];
        let totals = aggregate(&records);
        assert_eq!(totals.len(), 1);
        assert!((totals[&1] - 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_keeps_users_separate() {
        let records = vec![
            make_record(1, "1K"),
            make_record(2, "2K"),
            make_record(1, "1K"),
        ];
        let totals = aggregate(&records);
        assert_eq!(totals.len(), 2);
        assert!((totals[&1] - 2048.0).abs() < 1e-9);
        assert!((totals[&2] - 2048.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut records = vec![
            make_record(1, "1.5MB"),
            make_record(2, "900B"),
            make_record(1, "12.25KB"),
            make_record(3, "2G"),
            make_record(2, "0.75MB"),
        ];
        let forward = aggregate(&records);
        records.reverse();
        let backward = aggregate(&records);

        assert_eq!(forward.len(), backward.len());
        for (user_id, total) in &forward {
            assert!((total - backward[user_id]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_aggregate_is_additive() {
        let first = make_record(1, "1K");
        let second = make_record(1, "3K");

        let combined = aggregate(&[first.clone(), second.clone()]);
        let partial = aggregate(&[first]);
        let resumed = partial[&1] + second.traffic;

        assert!((combined[&1] - resumed).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_zero_traffic_still_creates_entry() {
        let totals = aggregate(&[make_record(5, "0B")]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&5], 0.0);
    }
}
