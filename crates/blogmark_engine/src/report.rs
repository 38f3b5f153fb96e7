use std::path::{Path, PathBuf};

use blogmark_core::{BulkConfig, BulkResult};
use serde_json::{json, Value};

use crate::persist::{write_to_path, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Machine-readable form of a bulk run, for auditing.
pub fn report_json(result: &BulkResult, config: &BulkConfig) -> Value {
    json!({
        "total": result.total,
        "processed": result.processed(),
        "succeeded": result.successful.len(),
        "failed": result.failed.len(),
        "success_rate": result.success_rate(),
        "config": {
            "output_dir": config.output_dir.display().to_string(),
            "concurrency": config.concurrency,
            "delay_ms": config.delay_ms() as u64,
            "continue_on_error": config.continue_on_error,
        },
        "successful": result.successful.iter().map(|s| {
            json!({ "url": s.url, "filepath": s.filepath.display().to_string() })
        }).collect::<Vec<_>>(),
        "failures": result.failed.iter().map(|f| {
            json!({ "url": f.url, "error": f.error })
        }).collect::<Vec<_>>(),
    })
}

pub fn write_report(
    result: &BulkResult,
    config: &BulkConfig,
    path: &Path,
) -> Result<PathBuf, ReportError> {
    let body = serde_json::to_string_pretty(&report_json(result, config))?;
    Ok(write_to_path(path, &body)?)
}
