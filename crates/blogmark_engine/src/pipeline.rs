use std::path::PathBuf;
use std::sync::Arc;

use blogmark_core::Stage;
use url::Url;

use crate::convert::{Converter, Html2MdConverter};
use crate::extract::{CascadeExtractor, Extractor};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::frontmatter::render_document;
use crate::progress::{LogSink, ProgressSink};
use crate::writer::{FsWriter, OutputTarget, Writer};
use crate::{ConvertError, EngineEvent, FetchError, JobId, JobProgress};

/// Fetch -> extract -> convert -> write for one URL.
///
/// Holds no per-conversion state, so one instance serves any number of
/// concurrent conversions.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    converter: Arc<dyn Converter>,
    writer: Arc<dyn Writer>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, writer: Arc<dyn Writer>) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(CascadeExtractor::new()),
            converter: Arc::new(Html2MdConverter::new()),
            writer,
        }
    }

    /// HTTP fetching with `settings`, writing to the filesystem.
    pub fn from_settings(settings: FetchSettings) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestFetcher::new(settings)?), Arc::new(FsWriter)))
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = converter;
        self
    }

    /// Convert `url` into `target`, logging progress.
    pub async fn convert_url(&self, url: &str, target: &OutputTarget) -> Result<PathBuf, ConvertError> {
        self.convert(1, url, target, &LogSink).await
    }

    /// Convert `url` into `target`, reporting each stage for `job_id` to `sink`.
    ///
    /// The first failing stage ends the conversion and its error is returned as is.
    pub async fn convert(
        &self,
        job_id: JobId,
        url: &str,
        target: &OutputTarget,
        sink: &dyn ProgressSink,
    ) -> Result<PathBuf, ConvertError> {
        let report = |stage: Stage| sink.emit(EngineEvent::Progress(JobProgress { job_id, stage }));

        report(Stage::Pending);
        Url::parse(url).map_err(|err| ConvertError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        report(Stage::Fetching);
        let page = self.fetcher.fetch(url).await?;

        report(Stage::Extracting);
        let article = self.extractor.extract(&page.html, url)?;

        report(Stage::Converting);
        let markdown = render_document(&article, self.converter.as_ref());

        report(Stage::Writing);
        let path = self
            .writer
            .write(&markdown, &article.title, url, target)
            .await?;

        Ok(path)
    }
}
