use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_CONCURRENCY: usize = 3;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// What the writer does when a title-derived filename already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Replace the existing file.
    Overwrite,
    /// Keep the existing file and write `{slug}-{url hash}.md` instead.
    #[default]
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Settings for one bulk run. Not modified while the run is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkConfig {
    pub output_dir: PathBuf,
    pub concurrency: usize,
    /// Pause taken by each conversion after it settles, unless it is the last URL.
    pub delay: Duration,
    pub continue_on_error: bool,
    pub collision: CollisionPolicy,
}

impl BulkConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            concurrency: DEFAULT_CONCURRENCY,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            continue_on_error: true,
            collision: CollisionPolicy::default(),
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn delay_ms(&self) -> u128 {
        self.delay.as_millis()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
