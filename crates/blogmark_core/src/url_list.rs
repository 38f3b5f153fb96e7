use blogmark_logging::bm_warn;
use url::Url;

/// URLs read from a line-oriented source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlList {
    pub urls: Vec<String>,
    /// Lines that were neither blank nor comments but failed URL validation.
    pub skipped: Vec<String>,
}

impl UrlList {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

/// Parse one URL per line. Blank lines and `#` comments are ignored; invalid
/// URLs are logged and reported in `skipped`.
pub fn parse_url_list(raw: &str) -> UrlList {
    let mut list = UrlList::default();
    for line in raw.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if is_valid_url(line) {
            list.urls.push(line.to_owned());
        } else {
            bm_warn!("Skipping invalid URL: {}", line);
            list.skipped.push(line.to_owned());
        }
    }
    list
}
