use std::path::PathBuf;

use blogmark_core::{plan_batches, BulkConfig, BulkResult, ConfigError, Stage};
use blogmark_logging::{bm_info, bm_warn};
use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::pipeline::Pipeline;
use crate::progress::ProgressSink;
use crate::writer::OutputTarget;
use crate::{EngineEvent, JobId, JobProgress};

/// Runs many conversions, `concurrency` at a time.
///
/// All conversions of a batch are polled on the calling task; the next batch
/// starts only once every conversion of the current one has settled,
/// including its pacing delay.
pub struct BulkRunner<'a> {
    pipeline: &'a Pipeline,
    sink: &'a dyn ProgressSink,
}

impl<'a> BulkRunner<'a> {
    pub fn new(pipeline: &'a Pipeline, sink: &'a dyn ProgressSink) -> Self {
        Self { pipeline, sink }
    }

    pub async fn run(&self, urls: &[String], config: &BulkConfig) -> Result<BulkResult, ConfigError> {
        config.validate()?;

        let total = urls.len();
        let mut result = BulkResult::new(total);
        let target = OutputTarget::Directory {
            dir: config.output_dir.clone(),
            collision: config.collision,
        };

        bm_info!(
            "Starting bulk conversion of {} URLs into {} (concurrency {}, delay {}ms)",
            total,
            config.output_dir.display(),
            config.concurrency,
            config.delay_ms()
        );

        for batch in plan_batches(urls, config.concurrency) {
            let mut in_flight: FuturesUnordered<_> = batch
                .numbered()
                .map(|(job_id, url)| self.run_one(job_id, total, url, &target, config))
                .collect();

            let mut batch_failed = false;
            while let Some((url, outcome)) = in_flight.next().await {
                match outcome {
                    Ok(path) => result.record_success(url, path),
                    Err(error) => {
                        batch_failed = true;
                        result.record_failure(url, error);
                    }
                }
            }

            if batch_failed && !config.continue_on_error {
                bm_warn!(
                    "Stopping after batch starting at URL {}: a conversion failed",
                    batch.offset + 1
                );
                break;
            }
        }

        bm_info!(
            "Bulk conversion finished: {} succeeded, {} failed, {} total",
            result.successful.len(),
            result.failed.len(),
            result.total
        );
        Ok(result)
    }

    async fn run_one(
        &self,
        job_id: JobId,
        total: usize,
        url: &str,
        target: &OutputTarget,
        config: &BulkConfig,
    ) -> (String, Result<PathBuf, String>) {
        self.sink.emit(EngineEvent::JobStarted {
            job_id,
            total,
            url: url.to_string(),
        });

        let outcome = self
            .pipeline
            .convert(job_id, url, target, self.sink)
            .await
            .map_err(|err| err.to_string());

        let stage = if outcome.is_ok() {
            Stage::Succeeded
        } else {
            Stage::Failed
        };
        self.sink
            .emit(EngineEvent::Progress(JobProgress { job_id, stage }));
        self.sink.emit(EngineEvent::JobCompleted {
            job_id,
            total,
            url: url.to_string(),
            result: outcome.clone(),
        });

        // Pace each slot so concurrent slots do not hit the server in lockstep.
        if job_id < total && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }

        (url.to_string(), outcome)
    }
}

/// Convenience wrapper around [`BulkRunner`].
pub async fn run_bulk(
    pipeline: &Pipeline,
    urls: &[String],
    config: &BulkConfig,
    sink: &dyn ProgressSink,
) -> Result<BulkResult, ConfigError> {
    BulkRunner::new(pipeline, sink).run(urls, config).await
}
