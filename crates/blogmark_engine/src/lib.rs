//! Blogmark engine: article extraction, Markdown rendering and the IO pipeline.
mod bulk;
mod convert;
mod dates;
mod decode;
mod extract;
mod fetch;
mod filename;
mod frontmatter;
mod metadata;
mod persist;
mod pipeline;
mod preview;
mod progress;
mod prune;
mod report;
mod types;
mod writer;

pub use bulk::{run_bulk, BulkRunner};
pub use convert::{Converter, Html2MdConverter, DEFAULT_REMOVALS};
pub use dates::{parse_date, parse_date_or};
pub use decode::{decode_body, DecodedHtml};
pub use extract::{
    Candidate, CandidateRule, CascadeExtractor, CascadeStage, ExtractedArticle, ExtractionError,
    Extractor, ExtractorConfig, InvalidSelector, Pruning, FALLBACK_MIN_CONTENT_LEN,
    MIN_CONTENT_LEN,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::{disambiguated_filename, sanitize_filename, slug_filename};
pub use frontmatter::{render_document, to_markdown, Frontmatter, MarkdownDocument};
pub use metadata::{sanitize_title, strip_by_prefix, LookupSpec, UNTITLED};
pub use persist::{ensure_output_dir, write_to_path, AtomicFileWriter, PersistError};
pub use pipeline::Pipeline;
pub use preview::text_preview;
pub use progress::{LogSink, ProgressSink, RecordingSink};
pub use report::{report_json, write_report, ReportError};
pub use types::{
    ConvertError, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchedPage, JobId,
    JobProgress,
};
pub use writer::{FsWriter, OutputTarget, Writer};
