//! Counters for board activity

use bucketeer_domain::Category;
use std::collections::HashMap;

/// Metrics collected while a board is open
///
/// Side-column counters are keyed by the column the item entered or left.
#[derive(Debug, Clone, Default)]
pub struct BoardMetrics {
    /// Items that left main, per destination
    pub entered: HashMap<Category, usize>,

    /// Items sent back to main by their timer, per source column
    pub timed_out: HashMap<Category, usize>,

    /// Items sent back to main by hand, per source column
    pub reverted_by_hand: HashMap<Category, usize>,

    /// Declined transition requests
    pub rejected: usize,

    /// Timers replaced by a newer timer for the same item
    pub superseded: usize,

    /// Timers still pending when the board was closed
    pub cancelled_on_close: usize,
}

impl BoardMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item leaving main
    pub fn record_entry(&mut self, destination: Category) {
        *self.entered.entry(destination).or_insert(0) += 1;
    }

    /// Record a timer-driven reversion
    pub fn record_timeout(&mut self, source: Category) {
        *self.timed_out.entry(source).or_insert(0) += 1;
    }

    /// Record a manual reversion
    pub fn record_manual(&mut self, source: Category) {
        *self.reverted_by_hand.entry(source).or_insert(0) += 1;
    }

    /// Record a declined request
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Record a timer replaced before it fired
    pub fn record_supersession(&mut self) {
        self.superseded += 1;
    }

    /// Record timers dropped at teardown
    pub fn record_teardown(&mut self, count: usize) {
        self.cancelled_on_close += count;
    }

    /// Total items that left main
    pub fn total_entered(&self) -> usize {
        self.entered.values().sum()
    }

    /// Total timer-driven reversions
    pub fn total_timed_out(&self) -> usize {
        self.timed_out.values().sum()
    }

    /// Total manual reversions
    pub fn total_reverted_by_hand(&self) -> usize {
        self.reverted_by_hand.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        self.entered.clear();
        self.timed_out.clear();
        self.reverted_by_hand.clear();
        self.rejected = 0;
        self.superseded = 0;
        self.cancelled_on_close = 0;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Board Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Entered side columns: {}", self.total_entered()),
            format!("Reverted on timeout: {}", self.total_timed_out()),
            format!("Reverted by hand: {}", self.total_reverted_by_hand()),
            format!("Rejected requests: {}", self.rejected),
            format!("Superseded timers: {}", self.superseded),
            format!("Timers cancelled on close: {}", self.cancelled_on_close),
        ];

        for (title, counts) in [
            ("Entries by column:", &self.entered),
            ("Timeouts by column:", &self.timed_out),
            ("Manual reversions by column:", &self.reverted_by_hand),
        ] {
            if counts.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(title.to_string());
            let mut rows: Vec<_> = counts.iter().collect();
            rows.sort();
            for (category, count) in rows {
                lines.push(format!("  {}: {}", category, count));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = BoardMetrics::new();
        assert_eq!(metrics.total_entered(), 0);
        assert_eq!(metrics.total_timed_out(), 0);
        assert_eq!(metrics.rejected, 0);
    }

    #[test]
    fn test_record_by_column() {
        let mut metrics = BoardMetrics::new();

        metrics.record_entry(Category::GroupA);
        metrics.record_entry(Category::GroupA);
        metrics.record_entry(Category::GroupB);
        metrics.record_timeout(Category::GroupA);
        metrics.record_manual(Category::GroupB);

        assert_eq!(metrics.entered.get(&Category::GroupA), Some(&2));
        assert_eq!(metrics.total_entered(), 3);
        assert_eq!(metrics.total_timed_out(), 1);
        assert_eq!(metrics.total_reverted_by_hand(), 1);
    }

    #[test]
    fn test_reset() {
        let mut metrics = BoardMetrics::new();
        metrics.record_entry(Category::GroupA);
        metrics.record_rejection();
        metrics.record_supersession();
        metrics.record_teardown(3);

        metrics.reset();

        assert_eq!(metrics.total_entered(), 0);
        assert_eq!(metrics.rejected, 0);
        assert_eq!(metrics.superseded, 0);
        assert_eq!(metrics.cancelled_on_close, 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = BoardMetrics::new();
        metrics.record_entry(Category::GroupB);
        metrics.record_rejection();

        let summary = metrics.summary();
        assert!(summary.contains("Entered side columns: 1"));
        assert!(summary.contains("Rejected requests: 1"));
        assert!(summary.contains("group-b: 1"));
        assert!(!summary.contains("Timeouts by column"));
    }
}
