use std::fmt::Write;

use crate::convert::{Converter, Html2MdConverter};
use crate::dates::parse_date;
use crate::extract::ExtractedArticle;

/// Document metadata, emitted in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub author: String,
    /// Placeholder, always empty for now.
    pub blurb: String,
    /// Placeholder, always empty for now.
    pub tags: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl MarkdownDocument {
    pub fn from_article(article: &ExtractedArticle, converter: &dyn Converter) -> Self {
        let date = if article.publish_date.is_empty() {
            parse_date("")
        } else {
            article.publish_date.clone()
        };
        Self {
            frontmatter: Frontmatter {
                title: article.title.clone(),
                date,
                author: article.author.clone(),
                blurb: String::new(),
                tags: Vec::new(),
                url: article.url.clone(),
            },
            body: converter.to_markdown(&article.content),
        }
    }

    /// `---\n<frontmatter>---\n\n<body>`, every scalar double-quoted.
    pub fn render(&self) -> String {
        let fm = &self.frontmatter;
        let mut out = String::from("---\n");
        push_scalar(&mut out, "title", &fm.title);
        push_scalar(&mut out, "date", &fm.date);
        push_scalar(&mut out, "author", &fm.author);
        push_scalar(&mut out, "blurb", &fm.blurb);
        let tags: Vec<String> = fm.tags.iter().map(|t| quote(t)).collect();
        let _ = writeln!(out, "{}: [{}]", quote("tags"), tags.join(", "));
        push_scalar(&mut out, "url", &fm.url);
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out
    }
}

/// Render `article` with the default converter.
pub fn to_markdown(article: &ExtractedArticle) -> String {
    render_document(article, &Html2MdConverter::default())
}

pub fn render_document(article: &ExtractedArticle, converter: &dyn Converter) -> String {
    MarkdownDocument::from_article(article, converter).render()
}

fn push_scalar(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{}: {}", quote(key), quote(value));
}

/// YAML double-quoted scalar.
pub(crate) fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\x{:02X}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
