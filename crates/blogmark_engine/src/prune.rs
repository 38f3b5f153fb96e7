//! Subtree cloning and node removal on top of `scraper`.
//!
//! Every function here works on a freshly parsed fragment, never on the
//! caller's document, so a rejected candidate leaves the source untouched.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

/// A detached, mutable copy of some HTML.
pub(crate) struct Fragment {
    html: Html,
}

impl Fragment {
    /// Copy the children of `element` into a standalone fragment.
    pub(crate) fn clone_children(element: ElementRef<'_>) -> Self {
        Self::parse(&element.inner_html())
    }

    pub(crate) fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_fragment(html),
        }
    }

    /// Remove every element matching any of `selectors`, with its subtree.
    pub(crate) fn remove_matching(&mut self, selectors: &[Selector]) -> usize {
        let root = self.html.root_element().id();
        let ids: Vec<NodeId> = selectors
            .iter()
            .flat_map(|sel| self.html.select(sel).map(|el| el.id()))
            .filter(|id| *id != root)
            .collect();
        self.detach_all(ids)
    }

    /// Remove every element below the fragment root whose whitespace-normalized,
    /// lowercased text contains one of `phrases`.
    ///
    /// Ancestors are matched too: a wrapper whose text includes a phrase anywhere
    /// is dropped whole.
    pub(crate) fn remove_containing_text(&mut self, phrases: &[String]) -> usize {
        if phrases.is_empty() {
            return 0;
        }
        let ids: Vec<NodeId> = self
            .html
            .root_element()
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| {
                let text = normalized_text(*el);
                phrases.iter().any(|phrase| text.contains(phrase.as_str()))
            })
            .map(|el| el.id())
            .collect();
        self.detach_all(ids)
    }

    pub(crate) fn into_html(self) -> String {
        self.html.root_element().inner_html()
    }

    fn detach_all(&mut self, ids: Vec<NodeId>) -> usize {
        let count = ids.len();
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
        count
    }
}

/// Lowercased text of `element` with runs of whitespace collapsed to one space.
pub(crate) fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|chunk| chunk.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trimmed character count, the measure every acceptance threshold uses.
pub(crate) fn content_len(html: &str) -> usize {
    html.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn removal_works_on_a_copy() {
        let doc = Html::parse_document("<main><p>keep</p><nav>menu</nav></main>");
        let main = doc.select(&sel("main")).next().unwrap();

        let mut fragment = Fragment::clone_children(main);
        assert_eq!(fragment.remove_matching(&[sel("nav")]), 1);

        assert_eq!(fragment.into_html(), "<p>keep</p>");
        assert!(doc.root_element().html().contains("<nav>menu</nav>"));
    }

    #[test]
    fn phrase_sweep_skips_the_fragment_root() {
        let mut fragment =
            Fragment::parse("<div><p>Body text</p></div><section><p>Subscribe   to our NEWSLETTER</p></section>");
        fragment.remove_containing_text(&["newsletter".to_string()]);
        assert_eq!(fragment.into_html(), "<div><p>Body text</p></div>");
    }

    #[test]
    fn normalized_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>More\n   On <b>Rust</b></p>");
        let p = doc.select(&sel("p")).next().unwrap();
        assert_eq!(normalized_text(p), "more on rust");
    }
}
