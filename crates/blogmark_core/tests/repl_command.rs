use blogmark_core::{CommandError, ReplCommand};
use pretty_assertions::assert_eq;

#[test]
fn fetch_command_requires_a_valid_url() {
    assert_eq!(
        ReplCommand::parse("#fetch https://blog.example.com/post"),
        Ok(ReplCommand::Fetch {
            url: "https://blog.example.com/post".to_string()
        })
    );
    assert_eq!(ReplCommand::parse("#fetch   "), Err(CommandError::MissingUrl));
    assert_eq!(
        ReplCommand::parse("#fetch not-a-url"),
        Err(CommandError::InvalidUrl)
    );
}

#[test]
fn bulk_command_requires_a_path() {
    assert_eq!(
        ReplCommand::parse("  #bulk urls.txt  "),
        Ok(ReplCommand::Bulk {
            path: "urls.txt".to_string()
        })
    );
    assert_eq!(ReplCommand::parse("#bulk"), Err(CommandError::MissingPath));
}

#[test]
fn quit_and_exit_end_the_session() {
    assert_eq!(ReplCommand::parse("quit"), Ok(ReplCommand::Quit));
    assert_eq!(ReplCommand::parse(" exit "), Ok(ReplCommand::Quit));
    assert_eq!(ReplCommand::parse(""), Ok(ReplCommand::Empty));
}

#[test]
fn unknown_input_is_rejected() {
    assert_eq!(ReplCommand::parse("fetch https://x.y"), Err(CommandError::Unknown));
    assert_eq!(ReplCommand::parse("#fetcher https://x.y"), Err(CommandError::Unknown));
}
