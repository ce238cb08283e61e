//! Cross-case report
//! Ranks test cases by average throughput and computes lag behind the fastest

use std::fmt;
use std::path::PathBuf;

use crate::stats::OpsStat;

/// One ranked test case
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub title: String,
    pub filepath: PathBuf,
    pub stat: OpsStat,
    /// `1 - avg / fastest_avg`; zero for the fastest case
    pub lag: f64,
}

impl ReportEntry {
    pub fn new(title: impl Into<String>, filepath: impl Into<PathBuf>, stat: OpsStat) -> Self {
        Self {
            title: title.into(),
            filepath: filepath.into(),
            stat,
            lag: 0.0,
        }
    }

    pub fn remark(&self) -> String {
        if self.lag == 0.0 {
            "fastest".to_string()
        } else {
            format!("{:.2}% slower", self.lag * 100.0)
        }
    }
}

/// Test cases ordered fastest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    /// Sort descending by average ops/s and fill in each entry's lag.
    /// Ties keep their input order. A zero fastest average leaves every lag at zero.
    pub fn rank(mut entries: Vec<ReportEntry>) -> Self {
        entries.sort_by(|a, b| b.stat.avg.total_cmp(&a.stat.avg));

        let fastest = entries.first().map(|e| e.stat.avg).unwrap_or(0.0);
        for entry in &mut entries {
            entry.lag = if fastest > 0.0 {
                1.0 - entry.stat.avg / fastest
            } else {
                0.0
            };
        }

        Self { entries }
    }

    pub fn fastest(&self) -> Option<&ReportEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[report] =============")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{} {:.2} ops/s {}",
                entry.title,
                entry.stat.avg,
                entry.remark()
            )?;
        }
        Ok(())
    }
}
