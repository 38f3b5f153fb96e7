use scraper::{Html, Selector};

pub const UNTITLED: &str = "Untitled";

/// Where to look for one metadata value, as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSpec {
    pub selector: String,
    /// Attributes read in order; the first non-empty one wins.
    pub attrs: Vec<String>,
    /// Fall back to the element's trimmed text when no attribute is set.
    pub text: bool,
}

impl LookupSpec {
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attrs: Vec::new(),
            text: true,
        }
    }

    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            attrs: vec![attr.to_string()],
            text: false,
        }
    }

    pub fn attrs_then_text(selector: &str, attrs: &[&str]) -> Self {
        Self {
            selector: selector.to_string(),
            attrs: attrs.iter().map(|a| a.to_string()).collect(),
            text: true,
        }
    }
}

pub fn default_title_lookups() -> Vec<LookupSpec> {
    vec![
        LookupSpec::text("h1"),
        LookupSpec::text("title"),
        LookupSpec::attr(r#"meta[property="og:title"]"#, "content"),
    ]
}

pub fn default_author_lookups() -> Vec<LookupSpec> {
    vec![
        LookupSpec::attr(r#"meta[name="author"]"#, "content"),
        LookupSpec::attr(r#"meta[property="article:author"]"#, "content"),
        LookupSpec::text(".author"),
        LookupSpec::text(".byline"),
    ]
}

pub fn default_date_lookups() -> Vec<LookupSpec> {
    vec![
        LookupSpec::attrs_then_text(
            r#"meta[property="article:published_time"]"#,
            &["content", "datetime"],
        ),
        LookupSpec::attrs_then_text(r#"meta[name="publish-date"]"#, &["content", "datetime"]),
        LookupSpec::attrs_then_text("time[datetime]", &["datetime", "content"]),
        LookupSpec::attrs_then_text(".published", &["content", "datetime"]),
        LookupSpec::attrs_then_text(".date", &["content", "datetime"]),
    ]
}

#[derive(Debug, Clone)]
pub(crate) struct Lookup {
    selector: Selector,
    attrs: Vec<String>,
    text: bool,
}

impl Lookup {
    pub(crate) fn compile(spec: &LookupSpec) -> Result<Self, String> {
        let selector = Selector::parse(&spec.selector).map_err(|err| err.to_string())?;
        Ok(Self {
            selector,
            attrs: spec.attrs.clone(),
            text: spec.text,
        })
    }

    /// Value of the first matching element, if it has a non-empty one.
    fn read(&self, doc: &Html) -> Option<String> {
        let element = doc.select(&self.selector).next()?;
        let from_attr = self
            .attrs
            .iter()
            .filter_map(|attr| element.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty());
        if let Some(value) = from_attr {
            return Some(value.to_string());
        }
        if !self.text {
            return None;
        }
        let text = element.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Value from the first lookup that yields one.
pub(crate) fn first_value(doc: &Html, lookups: &[Lookup]) -> Option<String> {
    lookups.iter().find_map(|lookup| lookup.read(doc))
}

/// Keep word characters, whitespace and hyphens; never returns an empty title.
pub fn sanitize_title(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        UNTITLED.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Drop a leading, case-insensitive `by ` from a byline.
pub fn strip_by_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed
        .get(..2)
        .filter(|head| head.eq_ignore_ascii_case("by"))
        .map(|_| &trimmed[2..])
        .filter(|rest| rest.starts_with(char::is_whitespace));
    match stripped {
        Some(rest) => rest.trim().to_string(),
        None => trimmed.to_string(),
    }
}
