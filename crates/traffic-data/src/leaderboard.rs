//! Top-N selection over per-user totals.

use std::collections::HashMap;

use traffic_core::models::LeaderboardEntry;

/// Select the top `n` users by total bytes.
///
/// Ordering is total bytes descending with ties broken by ascending user
/// id, so the result is deterministic regardless of map iteration order.
/// Returns `min(n, totals.len())` entries; an empty map yields an empty
/// leaderboard.
pub fn select_top(totals: &HashMap<i64, f64>, n: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = totals
        .iter()
        .map(|(&user_id, &total_bytes)| LeaderboardEntry {
            user_id,
            total_bytes,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_bytes
            .total_cmp(&a.total_bytes)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    entries.truncate(n);
    entries
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_totals(pairs: &[(i64, f64)]) -> HashMap<i64, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_select_top_empty_totals() {
        assert!(select_top(&HashMap::new(), 3).is_empty());
    }

    #[test]
    fn test_select_top_orders_descending() {
        let totals = make_totals(&[(1, 100.0), (2, 300.0), (3, 200.0)]);
        let top = select_top(&totals, 3);

        let users: Vec<i64> = top.iter().map(|e| e.user_id).collect();
        assert_eq!(users, vec![2, 3, 1]);
        assert!(top.windows(2).all(|w| w[0].total_bytes >= w[1].total_bytes));
    }

    #[test]
    fn test_select_top_truncates_to_n() {
        let totals = make_totals(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);
        let top = select_top(&totals, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].user_id, 4);
        assert_eq!(top[1].user_id, 3);
    }

    #[test]
    fn test_select_top_returns_fewer_when_exhausted() {
        let totals = make_totals(&[(7, 42.0)]);
        let top = select_top(&totals, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].user_id, 7);
        assert_eq!(top[0].total_bytes, 42.0);
    }

    #[test]
    fn test_select_top_ties_break_by_ascending_user_id() {
        // A=1: 500, B=2: 2048, C=3: 2048, D=4: 100 → [B, C, A].
        let totals = make_totals(&[(1, 500.0), (2, 2048.0), (3, 2048.0), (4, 100.0)]);
        let top = select_top(&totals, 3);

        let users: Vec<i64> = top.iter().map(|e| e.user_id).collect();
        assert_eq!(users, vec![2, 3, 1]);
    }

    #[test]
    fn test_select_top_zero_n() {
        let totals = make_totals(&[(1, 500.0)]);
        assert!(select_top(&totals, 0).is_empty());
    }

    #[test]
    fn test_select_top_entries_are_subset_of_totals() {
        let totals = make_totals(&[(1, 10.0), (2, 20.0), (3, 30.0)]);
        for entry in select_top(&totals, 2) {
            assert_eq!(totals[&entry.user_id], entry.total_bytes);
        }
    }
}
