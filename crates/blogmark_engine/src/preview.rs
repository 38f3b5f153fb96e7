use scraper::Html;

const TRUNCATED_MARKER: &str = "...";

/// Tag-free, whitespace-collapsed text of an HTML fragment, cut to `max_chars`.
pub fn text_preview(html: &str, max_chars: usize) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment
        .root_element()
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &text[..end]),
        None => text,
    }
}
