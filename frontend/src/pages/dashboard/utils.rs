use crate::api::{DashboardStats, ExpenseStatus};

/// One row per workflow status in graph order, zero-filled.
pub fn status_breakdown(stats: &DashboardStats) -> Vec<(ExpenseStatus, u64)> {
    ExpenseStatus::ALL
        .into_iter()
        .map(|status| (status, stats.by_status.get(&status).copied().unwrap_or(0)))
        .collect()
}

pub fn share_percent(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stats(by_status: BTreeMap<ExpenseStatus, u64>) -> DashboardStats {
        DashboardStats {
            total_expenses: by_status.values().sum(),
            total_amount: 0.0,
            currency: "EUR".into(),
            by_status,
            pending_approvals: 0,
            recent_expenses: Vec::new(),
        }
    }

    #[test]
    fn breakdown_lists_every_status_in_order() {
        let mut counts = BTreeMap::new();
        counts.insert(ExpenseStatus::Paid, 2);
        let rows = status_breakdown(&stats(counts));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], (ExpenseStatus::Draft, 0));
        assert_eq!(rows[3], (ExpenseStatus::Paid, 2));
    }

    #[test]
    fn share_percent_handles_empty_totals() {
        assert_eq!(share_percent(3, 0), 0);
        assert_eq!(share_percent(1, 3), 33);
        assert_eq!(share_percent(4, 4), 100);
    }
}
