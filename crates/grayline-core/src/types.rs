//! Result types produced by a pipeline run.

use std::fmt;
use std::time::Duration;

/// How the stages are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One task per stage; stages overlap across images
    Concurrent,
    /// Each image goes through every stage before the next one starts
    Sequential,
}

impl ExecutionMode {
    /// Pick the mode from a "run concurrently" flag.
    pub fn from_concurrent(concurrent: bool) -> Self {
        if concurrent {
            Self::Concurrent
        } else {
            Self::Sequential
        }
    }

    pub fn is_concurrent(self) -> bool {
        self == Self::Concurrent
    }
}

/// What the save stage reports for one job.
///
/// Sources that failed to load never produce an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub source_path: String,
    pub dest_path: String,
    /// Whether the encoded image was written to `dest_path`
    pub success: bool,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "Success: {}", self.dest_path)
        } else {
            write!(f, "Failed: {}", self.dest_path)
        }
    }
}

/// One of the four pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Load,
    Resize,
    Grayscale,
    Save,
}

/// Whether a stage began or finished work on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StagePhase {
    Started,
    Finished,
}

/// Progress notification emitted by a stage for one source.
///
/// `Finished` is emitted whether or not the stage succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: StageKind,
    pub phase: StagePhase,
    pub source_path: String,
}

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: ExecutionMode,
    /// Number of source paths fed into the pipeline
    pub submitted: usize,
    /// Save outcomes, in the order they arrived
    pub outcomes: Vec<Outcome>,
    /// Wall-clock time from start until the last outcome was drained
    pub elapsed: Duration,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }

    /// Sources that dropped out before reaching the save stage.
    pub fn skipped(&self) -> usize {
        self.submitted.saturating_sub(self.outcomes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, success: bool) -> Outcome {
        Outcome {
            source_path: format!("images/{name}"),
            dest_path: format!("images/output/{name}"),
            success,
        }
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            outcome("a.jpeg", true).to_string(),
            "Success: images/output/a.jpeg"
        );
        assert_eq!(
            outcome("b.jpeg", false).to_string(),
            "Failed: images/output/b.jpeg"
        );
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport {
            mode: ExecutionMode::Concurrent,
            submitted: 4,
            outcomes: vec![outcome("a", true), outcome("c", false), outcome("d", true)],
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ExecutionMode::from_concurrent(true), ExecutionMode::Concurrent);
        assert!(!ExecutionMode::from_concurrent(false).is_concurrent());
    }
}
