//! Blogmark core: pure bulk-run bookkeeping, input parsing and view-model helpers.
mod batch;
mod command;
mod config;
mod result;
mod summary;
mod url_list;

pub use batch::{plan_batches, Batch};
pub use command::{CommandError, ReplCommand};
pub use config::{
    BulkConfig, CollisionPolicy, ConfigError, DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS,
    DEFAULT_OUTPUT_DIR,
};
pub use result::{BulkResult, FailedUrl, Stage, SucceededUrl};
pub use summary::SummaryView;
pub use url_list::{is_valid_url, parse_url_list, UrlList};
