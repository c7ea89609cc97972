//! End-of-run summary.

use std::fmt;

use super::context::{RunStats, Tally};

/// Renders the run summary printed to stderr after generation.
pub struct RunReport<'a> {
    stats: &'a RunStats,
}

impl<'a> RunReport<'a> {
    pub fn new(stats: &'a RunStats) -> Self {
        RunReport { stats }
    }
}

fn write_tally(f: &mut fmt::Formatter<'_>, label: &str, tally: &Tally) -> fmt::Result {
    writeln!(
        f,
        "  {:<10} total={} generated={} skipped={}",
        label,
        tally.total,
        tally.generated,
        tally.skipped()
    )
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;

        if self.stats.unknown_tags.is_empty() {
            writeln!(f, "  unknown definition tags: none")?;
        } else {
            writeln!(f, "  unknown definition tags:")?;
            for (tag, count) in &self.stats.unknown_tags {
                writeln!(f, "    {}: {}", tag, count)?;
            }
        }

        write_tally(f, "functions:", &self.stats.functions)?;
        write_tally(f, "typedefs:", &self.stats.typedefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut stats = RunStats::default();
        stats.functions = Tally {
            total: 4,
            generated: 3,
        };
        stats.typedefs = Tally {
            total: 2,
            generated: 2,
        };
        stats.record_unknown_tag("enum");
        stats.record_unknown_tag("union");
        stats.record_unknown_tag("enum");

        let report = RunReport::new(&stats).to_string();
        assert!(report.starts_with("Summary:\n"));
        assert!(report.contains("    enum: 2\n"));
        assert!(report.contains("    union: 1\n"));
        assert!(report.contains("  functions: total=4 generated=3 skipped=1\n"));
        assert!(report.contains("  typedefs:  total=2 generated=2 skipped=0\n"));
    }

    #[test]
    fn test_report_empty_run() {
        let report = RunReport::new(&RunStats::default()).to_string();
        assert!(report.contains("unknown definition tags: none"));
        assert!(report.contains("functions: total=0 generated=0 skipped=0"));
        assert!(report.contains("typedefs:  total=0 generated=0 skipped=0"));
    }
}
