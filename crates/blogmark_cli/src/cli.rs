//! Command-line definitions.

use std::path::PathBuf;

use blogmark_core::{
    BulkConfig, CollisionPolicy, DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_OUTPUT_DIR,
};
use clap::{Args, Parser, Subcommand};

/// Convert blog articles into Markdown files with frontmatter.
#[derive(Debug, Parser)]
#[command(name = "blogmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write the log to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a single article
    Fetch(FetchArgs),

    /// Convert every URL listed in a file, or on stdin
    Bulk(BulkArgs),

    /// Read #fetch and #bulk commands from a prompt
    Interactive,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Article URL
    pub url: String,

    /// Write the Markdown to this file
    #[arg(short, long, conflicts_with = "save_dir")]
    pub output: Option<PathBuf>,

    /// Directory for a title-named file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub save_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// File with one URL per line; stdin when omitted
    pub file: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub save_dir: PathBuf,

    /// URLs converted at the same time
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Pause after each URL, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,

    /// Stop after the first batch that has a failure
    #[arg(long)]
    pub no_continue: bool,

    /// Replace files with the same title instead of adding a suffix
    #[arg(long)]
    pub overwrite: bool,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BulkArgs {
    pub fn config(&self) -> BulkConfig {
        let collision = if self.overwrite {
            CollisionPolicy::Overwrite
        } else {
            CollisionPolicy::Suffix
        };
        BulkConfig::new(&self.save_dir)
            .with_concurrency(self.concurrency)
            .with_delay_ms(self.delay)
            .with_continue_on_error(!self.no_continue)
            .with_collision(collision)
    }
}
