use std::fmt;
use std::path::PathBuf;

use blogmark_core::Stage;
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::persist::PersistError;

/// One-based position of a URL in the submitted list.
pub type JobId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub stage: Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobStarted {
        job_id: JobId,
        total: usize,
        url: String,
    },
    Progress(JobProgress),
    JobCompleted {
        job_id: JobId,
        total: usize,
        url: String,
        result: Result<PathBuf, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    /// The response came from a different URL than the one requested.
    pub redirected: bool,
    pub content_type: Option<String>,
    pub encoding: String,
    /// Some bytes were invalid in `encoding` and got replaced.
    pub decoded_lossily: bool,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({kind})")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Error of a single URL conversion. The first failing stage wins.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("Failed to save file: {0}")]
    Write(#[from] PersistError),
}

impl ConvertError {
    /// Stage at which the conversion stopped.
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::InvalidUrl { .. } => Stage::Pending,
            ConvertError::Fetch(_) => Stage::Fetching,
            ConvertError::Extraction(_) => Stage::Extracting,
            ConvertError::Write(_) => Stage::Writing,
        }
    }
}
