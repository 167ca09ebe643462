use std::collections::BTreeMap;
use std::fmt;

use crate::error::RecordError;

/// The two ingestion phases. Works must run after authors for name resolution to see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Authors,
    Works,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Authors => "authors",
            Phase::Works => "works",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rejected dump line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line number in the dump.
    pub line: usize,
    pub error: RecordError,
}

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Lines consumed from the dump, blank lines included.
    pub lines_read: usize,
    pub persisted: usize,
    /// Rejected lines in dump order.
    pub failures: Vec<LineFailure>,
    /// Set when the run stopped early on request.
    pub cancelled: bool,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self { phase, lines_read: 0, persisted: 0, failures: Vec::new(), cancelled: false }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// Failure counts grouped by [`RecordError::kind`].
    pub fn failures_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.error.kind()).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} phase: {} lines read, {} persisted, {} failed",
            self.phase,
            self.lines_read,
            self.persisted,
            self.failed()
        )?;

        let by_kind = self.failures_by_kind();
        if !by_kind.is_empty() {
            let parts: Vec<String> =
                by_kind.iter().map(|(kind, count)| format!("{kind}: {count}")).collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        if self.cancelled {
            f.write_str(" [cancelled]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let mut report = PhaseReport::new(Phase::Works);
        report.lines_read = 5;
        report.persisted = 2;
        report.failures = vec![
            LineFailure { line: 1, error: RecordError::Extraction },
            LineFailure {
                line: 3,
                error: RecordError::RequiredFieldMissing { field: "key".to_string() },
            },
            LineFailure { line: 4, error: RecordError::Extraction },
        ];

        assert_eq!(
            report.to_string(),
            "works phase: 5 lines read, 2 persisted, 3 failed (extraction: 2, required-field: 1)"
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_clean_report() {
        let report = PhaseReport::new(Phase::Authors);
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "authors phase: 0 lines read, 0 persisted, 0 failed");
    }
}
