use blogmark_logging::{bm_debug, bm_error, bm_trace};
use scraper::{Html, Selector};
use thiserror::Error;

use crate::dates::parse_date;
use crate::metadata::{
    default_author_lookups, default_date_lookups, default_title_lookups, first_value,
    sanitize_title, strip_by_prefix, Lookup, LookupSpec, UNTITLED,
};
use crate::preview::text_preview;
use crate::prune::{content_len, Fragment};

/// Minimum trimmed length of an accepted candidate from the primary cascade.
pub const MIN_CONTENT_LEN: usize = 100;
/// Minimum trimmed length in the enhanced fallback, where matches are broad.
pub const FALLBACK_MIN_CONTENT_LEN: usize = 500;

const PREVIEW_CHARS: usize = 200;

/// Result of a successful extraction. Only built once a candidate was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub author: String,
    /// `YYYY-MM-DD`.
    pub publish_date: String,
    /// Pruned HTML fragment.
    pub content: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("insufficient content: could not extract sufficient content from the page")]
    InsufficientContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector {selector:?}: {reason}")]
pub struct InvalidSelector {
    pub selector: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    Primary,
    Fallback,
}

/// Cleanup applied to a cloned candidate before it is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    /// The container is taken as content-focused already.
    None,
    /// Noise selectors plus the boilerplate phrase sweep.
    Aggressive,
    /// Structural noise tags and classes only.
    Structural,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRule {
    pub selector: String,
    pub min_len: usize,
    pub pruning: Pruning,
    pub stage: CascadeStage,
}

impl CandidateRule {
    fn primary(selector: &str, pruning: Pruning) -> Self {
        Self {
            selector: selector.to_string(),
            min_len: MIN_CONTENT_LEN,
            pruning,
            stage: CascadeStage::Primary,
        }
    }

    fn fallback(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            min_len: FALLBACK_MIN_CONTENT_LEN,
            pruning: Pruning::Structural,
            stage: CascadeStage::Fallback,
        }
    }
}

/// Everything the extractor does, as data. Adding a platform is adding a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Tried in order; the first candidate reaching its `min_len` wins.
    pub cascade: Vec<CandidateRule>,
    pub aggressive_noise: Vec<String>,
    /// Lowercase phrases; any element whose text contains one is dropped.
    pub boilerplate_phrases: Vec<String>,
    pub structural_noise: Vec<String>,
    /// Stripped from whichever candidate is accepted.
    pub final_noise: Vec<String>,
    pub title: Vec<LookupSpec>,
    pub author: Vec<LookupSpec>,
    pub date: Vec<LookupSpec>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let specific = [
            // GitHub blog
            "main .post-content",
            "main article .post-content",
            ".post-content",
            // WordPress and common blog engines
            ".entry-content",
            ".wp-block-post-content",
            ".post-body",
            ".article-content",
            ".blog-post-content",
            // Medium, dev.to and similar
            ".post-article-content",
            ".article-body",
        ];
        let generic = [
            "main article",
            r#"[role="main"] article"#,
            "main .content",
            "article",
            ".content",
        ];
        let fallback = [
            "main",
            r#"[role="main"]"#,
            ".main-content",
            "#main-content",
            ".page-content",
            "body .content",
            "body",
        ];

        let mut cascade: Vec<CandidateRule> = specific
            .iter()
            .map(|s| CandidateRule::primary(s, Pruning::None))
            .collect();
        cascade.push(CandidateRule::primary("main", Pruning::Aggressive));
        cascade.extend(generic.iter().map(|s| CandidateRule::primary(s, Pruning::None)));
        cascade.extend(fallback.iter().map(|s| CandidateRule::fallback(s)));

        Self {
            cascade,
            aggressive_noise: strings(&[
                ".author-bio",
                ".post-meta",
                ".share-buttons",
                ".tags",
                ".related-posts",
                ".newsletter-signup",
                ".explore-more",
                ".site-footer",
                ".breadcrumb",
                ".pagination",
                ".sidebar",
                ".widget",
                "nav",
                "header",
                "footer",
                "aside",
                ".more-on",
                ".site-wide-links",
                ".additional-links",
                ".newsletter",
                ".subscription-form",
                r#"[class*="newsletter"]"#,
                r#"[class*="related"]"#,
                r#"[class*="explore"]"#,
            ]),
            boilerplate_phrases: strings(&[
                "more on",
                "related posts",
                "explore more",
                "newsletter",
                "subscribe",
                "we do newsletters",
            ]),
            structural_noise: strings(&[
                "nav",
                "header",
                "footer",
                "aside",
                ".navigation",
                ".sidebar",
                ".ad",
                ".advertisement",
                ".widget",
                ".related-posts",
                ".newsletter-signup",
                ".explore-more",
                ".site-footer",
                ".breadcrumb",
                ".pagination",
            ]),
            final_noise: strings(&[
                "script",
                "style",
                "nav",
                "header",
                "footer",
                "aside",
                ".ad",
                ".advertisement",
                ".sidebar",
                ".widget",
                ".related-posts",
                ".newsletter-signup",
                ".explore-more",
                ".site-footer",
                ".breadcrumb",
                ".pagination",
                ".author-bio",
                ".tags",
                ".share-buttons",
            ]),
            title: default_title_lookups(),
            author: default_author_lookups(),
            date: default_date_lookups(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, url: &str) -> Result<ExtractedArticle, ExtractionError>;
}

/// The accepted content container before the final cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub selector: String,
    pub stage: CascadeStage,
    pub html: String,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    source: String,
    selector: Selector,
    min_len: usize,
    pruning: Pruning,
    stage: CascadeStage,
}

/// Selector-cascade extractor. Immutable once built; share it by reference.
#[derive(Debug, Clone)]
pub struct CascadeExtractor {
    rules: Vec<CompiledRule>,
    aggressive_noise: Vec<Selector>,
    boilerplate_phrases: Vec<String>,
    structural_noise: Vec<Selector>,
    final_noise: Vec<Selector>,
    title: Vec<Lookup>,
    author: Vec<Lookup>,
    date: Vec<Lookup>,
}

impl CascadeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ExtractorConfig) -> Result<Self, InvalidSelector> {
        let rules = config
            .cascade
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    source: rule.selector.clone(),
                    selector: compile(&rule.selector)?,
                    min_len: rule.min_len,
                    pruning: rule.pruning,
                    stage: rule.stage,
                })
            })
            .collect::<Result<Vec<_>, InvalidSelector>>()?;

        Ok(Self {
            rules,
            aggressive_noise: compile_all(&config.aggressive_noise)?,
            boilerplate_phrases: config
                .boilerplate_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
            structural_noise: compile_all(&config.structural_noise)?,
            final_noise: compile_all(&config.final_noise)?,
            title: compile_lookups(&config.title)?,
            author: compile_lookups(&config.author)?,
            date: compile_lookups(&config.date)?,
        })
    }

    /// Run the cascade against `html` without building an article.
    pub fn locate(&self, html: &str) -> Option<Candidate> {
        let doc = Html::parse_document(html);
        self.find_candidate(&doc)
    }

    fn find_candidate(&self, doc: &Html) -> Option<Candidate> {
        for rule in &self.rules {
            let Some(element) = doc.select(&rule.selector).next() else {
                continue;
            };
            let mut fragment = Fragment::clone_children(element);
            match rule.pruning {
                Pruning::None => {}
                Pruning::Aggressive => {
                    fragment.remove_matching(&self.aggressive_noise);
                    fragment.remove_containing_text(&self.boilerplate_phrases);
                }
                Pruning::Structural => {
                    fragment.remove_matching(&self.structural_noise);
                }
            }
            let html = fragment.into_html();
            let len = content_len(&html);
            bm_debug!(
                "Trying selector {:?} ({:?}): {} chars, need {}",
                rule.source,
                rule.stage,
                len,
                rule.min_len
            );
            if len >= rule.min_len {
                bm_debug!("Found content using selector {:?} ({} chars)", rule.source, len);
                bm_trace!("Content preview: {}", text_preview(&html, PREVIEW_CHARS));
                return Some(Candidate {
                    selector: rule.source.clone(),
                    stage: rule.stage,
                    html,
                });
            }
        }
        None
    }

    fn final_cleanup(&self, html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        fragment.remove_matching(&self.final_noise);
        fragment.into_html()
    }
}

impl Default for CascadeExtractor {
    fn default() -> Self {
        match Self::with_config(&ExtractorConfig::default()) {
            Ok(extractor) => extractor,
            Err(err) => {
                bm_error!("Built-in extractor rules failed to compile: {}", err);
                Self {
                    rules: Vec::new(),
                    aggressive_noise: Vec::new(),
                    boilerplate_phrases: Vec::new(),
                    structural_noise: Vec::new(),
                    final_noise: Vec::new(),
                    title: Vec::new(),
                    author: Vec::new(),
                    date: Vec::new(),
                }
            }
        }
    }
}

impl Extractor for CascadeExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<ExtractedArticle, ExtractionError> {
        let doc = Html::parse_document(html);

        let candidate = self
            .find_candidate(&doc)
            .ok_or(ExtractionError::InsufficientContent)?;

        let title = first_value(&doc, &self.title).unwrap_or_else(|| UNTITLED.to_string());
        let author = first_value(&doc, &self.author).unwrap_or_default();
        let date = first_value(&doc, &self.date).unwrap_or_default();

        Ok(ExtractedArticle {
            title: sanitize_title(&title),
            author: strip_by_prefix(&author),
            publish_date: parse_date(&date),
            content: self.final_cleanup(&candidate.html),
            url: url.to_string(),
        })
    }
}

fn compile(selector: &str) -> Result<Selector, InvalidSelector> {
    Selector::parse(selector).map_err(|err| InvalidSelector {
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}

fn compile_all(selectors: &[String]) -> Result<Vec<Selector>, InvalidSelector> {
    selectors.iter().map(|s| compile(s)).collect()
}

fn compile_lookups(specs: &[LookupSpec]) -> Result<Vec<Lookup>, InvalidSelector> {
    specs
        .iter()
        .map(|spec| {
            Lookup::compile(spec).map_err(|reason| InvalidSelector {
                selector: spec.selector.clone(),
                reason,
            })
        })
        .collect()
}
