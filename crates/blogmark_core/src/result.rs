use std::fmt;
use std::path::PathBuf;

/// Where a single URL is in its conversion. There is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Pending,
    Fetching,
    Extracting,
    Converting,
    Writing,
    Succeeded,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Converting => "converting",
            Stage::Writing => "writing",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SucceededUrl {
    pub url: String,
    pub filepath: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUrl {
    pub url: String,
    pub error: String,
}

/// Aggregated outcome of a bulk run.
///
/// Entries are appended in completion order, which is not submission order
/// once more than one conversion runs at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkResult {
    pub successful: Vec<SucceededUrl>,
    pub failed: Vec<FailedUrl>,
    pub total: usize,
}

impl BulkResult {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, url: impl Into<String>, filepath: impl Into<PathBuf>) {
        self.successful.push(SucceededUrl {
            url: url.into(),
            filepath: filepath.into(),
        });
    }

    pub fn record_failure(&mut self, url: impl Into<String>, error: impl Into<String>) {
        self.failed.push(FailedUrl {
            url: url.into(),
            error: error.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Number of URLs that settled. Less than `total` when the run was aborted.
    pub fn processed(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    /// Percentage of `total` that succeeded, `0.0` for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful.len() as f64 * 100.0 / self.total as f64
    }
}
