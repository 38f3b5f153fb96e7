use thiserror::Error;

use crate::url_list::is_valid_url;

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `#fetch <url>`: convert a single page with default settings.
    Fetch { url: String },
    /// `#bulk <file>`: convert every URL listed in a file.
    Bulk { path: String },
    /// `quit` or `exit`.
    Quit,
    /// Blank line.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please provide a URL: #fetch <url>")]
    MissingUrl,
    #[error("Invalid URL format. Please provide a valid URL.")]
    InvalidUrl,
    #[error("Please provide a file path: #bulk <file>")]
    MissingPath,
    #[error("Invalid command. Use \"#fetch <url>\" or \"#bulk <file>\".")]
    Unknown,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(ReplCommand::Empty);
        }
        if input == "quit" || input == "exit" {
            return Ok(ReplCommand::Quit);
        }
        if let Some(rest) = strip_command(input, "#fetch") {
            if rest.is_empty() {
                return Err(CommandError::MissingUrl);
            }
            if !is_valid_url(rest) {
                return Err(CommandError::InvalidUrl);
            }
            return Ok(ReplCommand::Fetch {
                url: rest.to_owned(),
            });
        }
        if let Some(rest) = strip_command(input, "#bulk") {
            if rest.is_empty() {
                return Err(CommandError::MissingPath);
            }
            return Ok(ReplCommand::Bulk {
                path: rest.to_owned(),
            });
        }
        Err(CommandError::Unknown)
    }
}

/// Matches `name` alone or followed by whitespace, returning the trimmed argument.
fn strip_command<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(name)?;
    if rest.is_empty() {
        return Some(rest);
    }
    if rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}
