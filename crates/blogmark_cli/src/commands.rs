//! Handlers for `fetch` and `bulk`, shared with the interactive prompt.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use blogmark_core::{parse_url_list, BulkConfig, BulkResult, SummaryView};
use blogmark_engine::{run_bulk, write_report, OutputTarget, Pipeline};
use blogmark_logging::{bm_info, bm_warn};
use tokio::io::AsyncReadExt;

use crate::cli::{BulkArgs, FetchArgs};
use crate::console::ConsoleSink;

pub async fn execute_fetch(args: FetchArgs, pipeline: &Pipeline) -> ExitCode {
    let target = match args.output {
        Some(path) => OutputTarget::File(path),
        None => OutputTarget::directory(args.save_dir),
    };
    if convert_one(pipeline, &args.url, &target).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Convert one URL, printing the saved path or the error. Returns whether it worked.
pub async fn convert_one(pipeline: &Pipeline, url: &str, target: &OutputTarget) -> bool {
    println!("Converting: {url}");
    match pipeline.convert_url(url, target).await {
        Ok(path) => {
            println!("Saved to: {}", path.display());
            true
        }
        Err(err) => {
            eprintln!("Error: {err}");
            false
        }
    }
}

pub async fn execute_bulk(args: BulkArgs, pipeline: &Pipeline) -> anyhow::Result<ExitCode> {
    let raw = match &args.file {
        Some(path) => read_list_file(path)?,
        None => read_stdin().await?,
    };
    let config = args.config();
    let Some(result) = convert_list(pipeline, &raw, &config).await? else {
        return Ok(ExitCode::FAILURE);
    };

    if let Some(path) = &args.report {
        let written = write_report(&result, &config, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to: {}", written.display());
    }

    Ok(exit_code(&result))
}

/// Run a bulk conversion over the URLs in `raw` and print the summary.
///
/// Returns `None` without converting anything when `raw` holds no valid URL.
pub async fn convert_list(
    pipeline: &Pipeline,
    raw: &str,
    config: &BulkConfig,
) -> anyhow::Result<Option<BulkResult>> {
    let list = parse_url_list(raw);
    if !list.skipped.is_empty() {
        bm_warn!("Skipped {} invalid URL(s)", list.skipped.len());
    }
    if list.is_empty() {
        eprintln!("No valid URLs found");
        return Ok(None);
    }

    println!("Found {} URLs to process", list.urls.len());
    bm_info!("Output directory: {}", config.output_dir.display());

    let result = run_bulk(pipeline, &list.urls, config, &ConsoleSink).await?;

    println!();
    for line in SummaryView::from_result(&result, &config.output_dir).lines() {
        println!("{line}");
    }
    Ok(Some(result))
}

pub fn read_list_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {}", path.display()))
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read URLs from stdin")?;
    Ok(raw)
}

pub fn exit_code(result: &BulkResult) -> ExitCode {
    if result.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
