use blogmark_engine::{EngineEvent, ProgressSink};
use blogmark_logging::bm_debug;

/// Prints `[i/N]` progress lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: EngineEvent) {
        if let Some(line) = progress_line(&event) {
            println!("{line}");
        }
    }
}

/// The line printed for `event`, if any. Stage changes only go to the log.
pub fn progress_line(event: &EngineEvent) -> Option<String> {
    match event {
        EngineEvent::JobStarted { job_id, total, url } => {
            Some(format!("[{job_id}/{total}] Processing: {url}"))
        }
        EngineEvent::Progress(progress) => {
            bm_debug!("[{}] stage {}", progress.job_id, progress.stage);
            None
        }
        EngineEvent::JobCompleted {
            job_id,
            total,
            result,
            ..
        } => Some(match result {
            Ok(path) => format!("[{job_id}/{total}] Success: {}", path.display()),
            Err(err) => format!("[{job_id}/{total}] Failed: {err}"),
        }),
    }
}
