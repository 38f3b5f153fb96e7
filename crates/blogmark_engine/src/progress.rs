use std::sync::Mutex;

use blogmark_core::Stage;
use blogmark_logging::{bm_debug, bm_info, bm_warn};

use crate::EngineEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sends every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::JobStarted { job_id, total, url } => {
                bm_info!("[{}/{}] Processing: {}", job_id, total, url);
            }
            EngineEvent::Progress(progress) => {
                bm_debug!("[{}] stage {}", progress.job_id, progress.stage);
            }
            EngineEvent::JobCompleted {
                job_id,
                total,
                result,
                ..
            } => match result {
                Ok(path) => bm_info!("[{}/{}] Success: {}", job_id, total, path.display()),
                Err(err) => bm_warn!("[{}/{}] Failed: {}", job_id, total, err),
            },
        }
    }
}

/// Keeps events in memory, for callers that inspect a run afterwards.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        match self.events.lock() {
            Ok(mut events) => events.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    /// Stages reported so far for `job_id`, in order.
    pub fn stages_of(&self, job_id: usize) -> Vec<Stage> {
        let events = match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress(progress) if progress.job_id == job_id => {
                    Some(progress.stage)
                }
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
