//! Interactive prompt.

use std::path::Path;

use anyhow::Context;
use blogmark_core::{BulkConfig, ReplCommand};
use blogmark_engine::{OutputTarget, Pipeline};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{convert_list, convert_one, read_list_file};

const PROMPT: &str = "blogmark> ";

/// Read commands until `quit`, `exit` or end of input. Failed commands never end the session.
pub async fn run_repl(pipeline: &Pipeline) -> anyhow::Result<()> {
    println!("blogmark interactive mode");
    println!("  #fetch <url>   convert one article");
    println!("  #bulk <file>   convert every URL in a file");
    println!("  quit           leave");
    println!();

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    let config = BulkConfig::default();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match ReplCommand::parse(&line) {
                    Ok(ReplCommand::Empty) => {}
                    Ok(ReplCommand::Quit) => break,
                    Ok(ReplCommand::Fetch { url }) => {
                        let target = OutputTarget::directory(&config.output_dir);
                        convert_one(pipeline, &url, &target).await;
                    }
                    Ok(ReplCommand::Bulk { path }) => {
                        let outcome = match read_list_file(Path::new(&path)) {
                            Ok(raw) => convert_list(pipeline, &raw, &config).await.map(|_| ()),
                            Err(err) => Err(err),
                        };
                        if let Err(err) = outcome {
                            eprintln!("Error: {err:#}");
                        }
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) => println!("Use 'quit' to exit"),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }

    println!("Goodbye!");
    Ok(())
}
