use std::sync::Once;

use blogmark_core::parse_url_list;
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(blogmark_logging::initialize_for_tests);
}

#[test]
fn blank_lines_and_comments_are_ignored() {
    init_logging();
    let raw = "https://a.example.com/post \n\n# reading list\n   \n  https://b.example.com\n";

    let list = parse_url_list(raw);

    assert_eq!(
        list.urls,
        vec![
            "https://a.example.com/post".to_string(),
            "https://b.example.com".to_string(),
        ]
    );
    assert!(list.skipped.is_empty());
}

#[test]
fn invalid_urls_are_skipped_and_reported() {
    init_logging();
    let raw = "not a url\nhttps://ok.example.com/x\nexample.com/no-scheme\n";

    let list = parse_url_list(raw);

    assert_eq!(list.urls, vec!["https://ok.example.com/x".to_string()]);
    assert_eq!(
        list.skipped,
        vec!["not a url".to_string(), "example.com/no-scheme".to_string()]
    );
}

#[test]
fn windows_line_endings_are_handled() {
    init_logging();
    let list = parse_url_list("https://a.example.com\r\nhttps://b.example.com\r\n");
    assert_eq!(list.urls.len(), 2);
    assert_eq!(list.urls[0], "https://a.example.com");
}

#[test]
fn comment_only_input_is_empty() {
    init_logging();
    let list = parse_url_list("# nothing here\n\n");
    assert!(list.is_empty());
}
