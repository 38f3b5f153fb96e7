use blogmark_logging::bm_error;
use scraper::Selector;

use crate::prune::Fragment;

/// Elements the converter never emits, even if extraction let them through.
pub const DEFAULT_REMOVALS: &[&str] = &[
    "script",
    "style",
    "nav",
    "header",
    "footer",
    "aside",
    ".ad",
    ".advertisement",
];

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

/// `html2md` with a removal pre-pass and ATX headings.
///
/// `html2md` handles fenced code blocks and GFM tables itself but underlines
/// `h1`/`h2`; those are rewritten to `#`/`##` afterwards.
#[derive(Debug, Clone)]
pub struct Html2MdConverter {
    removals: Vec<Selector>,
}

impl Html2MdConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_removals(selectors: &[&str]) -> Self {
        let removals = selectors
            .iter()
            .filter_map(|s| match Selector::parse(s) {
                Ok(sel) => Some(sel),
                Err(err) => {
                    bm_error!("Ignoring removal selector {:?}: {}", s, err);
                    None
                }
            })
            .collect();
        Self { removals }
    }
}

impl Default for Html2MdConverter {
    fn default() -> Self {
        Self::with_removals(DEFAULT_REMOVALS)
    }
}

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        fragment.remove_matching(&self.removals);
        let markdown = html2md::parse_html(&fragment.into_html());
        atx_headings(markdown.trim())
    }
}

/// Rewrite setext headings (`Title` over `===` or `---`) as ATX headings.
fn atx_headings(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence && can_be_heading_text(line) {
            if let Some(level) = lines.get(i + 1).and_then(|next| setext_level(next)) {
                out.push(format!("{} {}", "#".repeat(level), line.trim()));
                i += 2;
                continue;
            }
        }
        out.push(line.to_string());
        i += 1;
    }

    out.join("\n")
}

fn setext_level(line: &str) -> Option<usize> {
    let t = line.trim();
    if t.len() < 3 {
        return None;
    }
    if t.chars().all(|c| c == '=') {
        Some(1)
    } else if t.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

fn can_be_heading_text(line: &str) -> bool {
    let t = line.trim();
    !(t.is_empty()
        || line.starts_with("    ")
        || t.starts_with('#')
        || t.starts_with('>')
        || t.starts_with('|'))
}
