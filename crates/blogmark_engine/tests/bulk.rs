use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use blogmark_core::{BulkConfig, ConfigError, Stage};
use blogmark_engine::{
    report_json, run_bulk, write_report, EngineEvent, FailureKind, FetchError, FetchMetadata,
    FetchedPage, Fetcher, OutputTarget, PersistError, Pipeline, RecordingSink, Writer,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Serves a long article for every URL except those containing `thin`.
#[derive(Default)]
struct FakeFetcher {
    fetched: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if url.contains("unreachable") {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        let body = if url.contains("thin") {
            "<p>Nothing here.</p>".to_string()
        } else {
            format!(
                "<article><h1>Post {}</h1><p>{}</p></article>",
                url.rsplit('/').next().unwrap_or_default(),
                "Plenty of article text for the extractor to accept. ".repeat(5)
            )
        };
        Ok(FetchedPage {
            html: format!("<html><body>{body}</body></html>"),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirected: false,
                content_type: Some("text/html".to_string()),
                encoding: "UTF-8".to_string(),
                decoded_lossily: false,
                byte_len: body.len() as u64,
            },
        })
    }
}

/// Records documents instead of touching the disk.
#[derive(Default)]
struct MemoryWriter {
    written: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Writer for MemoryWriter {
    async fn write(
        &self,
        markdown: &str,
        title: &str,
        _url: &str,
        target: &OutputTarget,
    ) -> Result<PathBuf, PersistError> {
        self.written
            .lock()
            .unwrap()
            .push((title.to_string(), markdown.to_string()));
        let dir = match target {
            OutputTarget::Directory { dir, .. } => dir.clone(),
            OutputTarget::File(path) => return Ok(path.clone()),
        };
        Ok(dir.join(format!("{}.md", title.to_lowercase().replace(' ', "-"))))
    }
}

fn harness() -> (Arc<FakeFetcher>, Arc<MemoryWriter>, Pipeline) {
    let fetcher = Arc::new(FakeFetcher::default());
    let writer = Arc::new(MemoryWriter::default());
    let pipeline = Pipeline::new(fetcher.clone(), writer.clone());
    (fetcher, writer, pipeline)
}

fn urls(paths: &[&str]) -> Vec<String> {
    paths
        .iter()
        .map(|p| format!("https://blog.example.com/{p}"))
        .collect()
}

fn config() -> BulkConfig {
    BulkConfig::new("out").with_delay_ms(0)
}

#[tokio::test]
async fn every_url_settles_exactly_once() {
    let (fetcher, writer, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["a", "thin-b", "c", "thin-d", "e"]);

    let result = run_bulk(&pipeline, &input, &config().with_concurrency(2), &sink)
        .await
        .unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.successful.len(), 3);
    assert_eq!(result.failed.len(), 2);
    assert_eq!(result.processed(), result.total);
    assert!(result.has_failures());
    assert_eq!(fetcher.fetched().len(), 5);
    assert_eq!(writer.written.lock().unwrap().len(), 3);

    let mut failed: Vec<&str> = result.failed.iter().map(|f| f.url.as_str()).collect();
    failed.sort();
    assert_eq!(failed, vec![input[1].as_str(), input[3].as_str()]);
    assert!(result
        .failed
        .iter()
        .all(|f| f.error.contains("insufficient content")));
}

#[tokio::test]
async fn fetch_failures_carry_the_fetch_message() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["unreachable"]);

    let result = run_bulk(&pipeline, &input, &config(), &sink).await.unwrap();

    assert_eq!(result.failed.len(), 1);
    assert!(result.failed[0].error.starts_with("Failed to fetch URL:"));
    assert!(result.failed[0].error.contains("connection refused"));
}

#[tokio::test]
async fn stop_on_error_skips_later_batches() {
    let (fetcher, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["thin-a", "b", "c", "d", "e"]);
    let config = config().with_concurrency(2).with_continue_on_error(false);

    let result = run_bulk(&pipeline, &input, &config, &sink).await.unwrap();

    assert_eq!(result.total, 5);
    assert_eq!(result.processed(), 2);
    assert_eq!(result.successful.len(), 1);
    assert_eq!(result.failed.len(), 1);
    let mut fetched = fetcher.fetched();
    fetched.sort();
    assert_eq!(fetched, vec![input[0].clone(), input[1].clone()]);
}

#[tokio::test]
async fn continue_on_error_processes_everything() {
    let (fetcher, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["thin-a", "b", "c"]);

    let result = run_bulk(&pipeline, &input, &config().with_concurrency(1), &sink)
        .await
        .unwrap();

    assert_eq!(result.processed(), 3);
    assert_eq!(fetcher.fetched(), input);
}

#[tokio::test]
async fn batches_never_exceed_concurrency() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["a", "b", "c", "d", "e"]);

    run_bulk(&pipeline, &input, &config().with_concurrency(2), &sink)
        .await
        .unwrap();

    // Batch boundaries: every job of a batch completes before the next batch starts.
    let events = sink.take();
    let mut in_flight = 0usize;
    let mut max_in_flight = 0usize;
    for event in &events {
        match event {
            EngineEvent::JobStarted { .. } => {
                in_flight += 1;
                max_in_flight = max_in_flight.max(in_flight);
            }
            EngineEvent::JobCompleted { .. } => in_flight -= 1,
            EngineEvent::Progress(_) => {}
        }
    }
    assert_eq!(in_flight, 0);
    assert!(max_in_flight <= 2);

    let started: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::JobStarted { job_id, total, .. } => {
                assert_eq!(*total, 5);
                Some(*job_id)
            }
            _ => None,
        })
        .collect();
    let mut sorted = started.clone();
    sorted.sort();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn stages_are_reported_in_order() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = urls(&["good", "thin"]);

    run_bulk(&pipeline, &input, &config().with_concurrency(1), &sink)
        .await
        .unwrap();

    assert_eq!(
        sink.stages_of(1),
        vec![
            Stage::Pending,
            Stage::Fetching,
            Stage::Extracting,
            Stage::Converting,
            Stage::Writing,
            Stage::Succeeded
        ]
    );
    assert_eq!(
        sink.stages_of(2),
        vec![
            Stage::Pending,
            Stage::Fetching,
            Stage::Extracting,
            Stage::Failed
        ]
    );
}

#[tokio::test]
async fn invalid_urls_fail_without_fetching() {
    let (fetcher, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let input = vec!["not a url".to_string()];

    let result = run_bulk(&pipeline, &input, &config(), &sink).await.unwrap();

    assert_eq!(result.failed.len(), 1);
    assert!(fetcher.fetched().is_empty());
    assert_eq!(sink.stages_of(1), vec![Stage::Pending, Stage::Failed]);
}

#[tokio::test]
async fn zero_concurrency_is_rejected() {
    let (fetcher, _, pipeline) = harness();
    let sink = RecordingSink::new();

    let err = run_bulk(&pipeline, &urls(&["a"]), &config().with_concurrency(0), &sink)
        .await
        .unwrap_err();

    assert_eq!(err, ConfigError::ZeroConcurrency);
    assert!(fetcher.fetched().is_empty());
}

#[tokio::test]
async fn empty_input_yields_empty_result() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();

    let result = run_bulk(&pipeline, &[], &config(), &sink).await.unwrap();

    assert_eq!(result.total, 0);
    assert_eq!(result.success_rate(), 0.0);
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn delay_follows_every_url_but_the_last() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let config = BulkConfig::new("out")
        .with_concurrency(1)
        .with_delay_ms(60);

    let started = Instant::now();
    run_bulk(&pipeline, &urls(&["a", "b", "c"]), &config, &sink)
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(120));

    let started = Instant::now();
    let single = BulkConfig::new("out").with_delay_ms(2_000);
    run_bulk(&pipeline, &urls(&["a"]), &single, &sink)
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(1_500));
}

#[tokio::test]
async fn report_lists_every_outcome() {
    let (_, _, pipeline) = harness();
    let sink = RecordingSink::new();
    let config = config().with_concurrency(3);
    let result = run_bulk(&pipeline, &urls(&["a", "thin-b", "c"]), &config, &sink)
        .await
        .unwrap();

    let json = report_json(&result, &config);
    assert_eq!(json["total"], 3);
    assert_eq!(json["succeeded"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["config"]["concurrency"], 3);
    assert_eq!(json["failures"].as_array().unwrap().len(), 1);

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reports").join("run.json");
    let written = write_report(&result, &config, &path).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(parsed["total"], json["total"]);
    assert_eq!(parsed["successful"], json["successful"]);
    assert_eq!(parsed["failures"], json["failures"]);
}
