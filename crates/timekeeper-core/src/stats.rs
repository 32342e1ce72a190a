use std::fmt;

use serde::{Deserialize, Serialize};

/// Running tallies for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: u64,
    pub processed: u64,
    pub metadata: u64,
    pub fallback: u64,
    pub errors: u64,
}

impl BatchStats {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self, via_metadata: bool) {
        self.processed += 1;
        if via_metadata {
            self.metadata += 1;
        } else {
            self.fallback += 1;
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn summary(&self) -> Summary {
        let pct = |n: u64| {
            if self.processed == 0 {
                0.0
            } else {
                n as f64 / self.processed as f64 * 100.0
            }
        };
        Summary {
            total: self.total,
            processed: self.processed,
            metadata: self.metadata,
            metadata_pct: pct(self.metadata),
            fallback: self.fallback,
            fallback_pct: pct(self.fallback),
            errors: self.errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u64,
    pub processed: u64,
    pub metadata: u64,
    pub metadata_pct: f64,
    pub fallback: u64,
    pub fallback_pct: f64,
    pub errors: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SUMMARY ===")?;
        writeln!(f, "Total files: {}", self.total)?;
        writeln!(f, "Successfully processed: {}", self.processed)?;
        if self.processed > 0 {
            writeln!(f, "  - Using metadata: {} ({:.1}%)", self.metadata, self.metadata_pct)?;
            writeln!(
                f,
                "  - Using fallback (modification time): {} ({:.1}%)",
                self.fallback, self.fallback_pct
            )?;
        }
        write!(f, "Errors: {}", self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_percentages() {
        let mut stats = BatchStats::new(5);
        stats.record_processed(true);
        stats.record_processed(true);
        stats.record_processed(true);
        stats.record_processed(false);
        stats.record_error();

        let s = stats.summary();
        assert_eq!(s.processed, 4);
        assert_eq!(s.metadata, 3);
        assert_eq!(s.fallback, 1);
        assert_eq!(s.errors, 1);
        assert_eq!(s.metadata_pct, 75.0);
        assert_eq!(s.fallback_pct, 25.0);

        let text = s.to_string();
        assert!(text.contains("Total files: 5"));
        assert!(text.contains("Using metadata: 3 (75.0%)"));
        assert!(text.contains("(modification time): 1 (25.0%)"));
        assert!(text.ends_with("Errors: 1"));
    }

    #[test]
    fn test_empty_batch() {
        let s = BatchStats::new(0).summary();
        assert_eq!(s.metadata_pct, 0.0);
        assert!(!s.to_string().contains('%'));
    }

    #[test]
    fn test_summary_json() {
        let mut stats = BatchStats::new(1);
        stats.record_processed(false);
        let json = serde_json::to_value(stats.summary()).unwrap();
        assert_eq!(json["fallback"], 1);
        assert_eq!(json["fallback_pct"], 100.0);
    }
}
