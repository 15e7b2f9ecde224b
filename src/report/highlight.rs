//! Item renderer with term highlighting.
//!
//! Wraps an inner renderer and prefixes a red `!` marker when the rendered
//! text contains any of a configured set of terms, matched case-insensitively
//! on word boundaries. Useful for making the handful of interesting items
//! stand out in a busy report.

use crossterm::style::Stylize;
use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;
use crate::report::Renderer;

/// Renderer wrapper that flags items matching a term set.
pub struct HighlightRenderer<T> {
    pattern: Option<Regex>,
    inner: Renderer<T>,
}

impl<T: 'static> HighlightRenderer<T> {
    /// Creates a highlighting renderer around `inner`.
    ///
    /// Terms are matched literally (regex metacharacters are escaped),
    /// case-insensitively, on word boundaries. An empty term set disables
    /// highlighting.
    ///
    /// # Errors
    /// [`ConfigError::InvalidHighlight`] if the combined pattern fails to
    /// compile.
    pub fn new(
        terms: impl IntoIterator<Item = impl AsRef<str>>,
        inner: impl Fn(&T) -> String + Send + 'static,
    ) -> Result<Self, ConfigError> {
        let alternatives: Vec<String> = terms
            .into_iter()
            .map(|t| regex::escape(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            let source = format!(r"\b(?:{})\b", alternatives.join("|"));
            let regex = RegexBuilder::new(&source)
                .case_insensitive(true)
                .build()
                .map_err(|e| ConfigError::InvalidHighlight {
                    reason: e.to_string(),
                })?;
            Some(regex)
        };

        Ok(Self {
            pattern,
            inner: Box::new(inner),
        })
    }

    /// Renders one item, prefixing a red `!` marker when any term matches.
    #[must_use]
    pub fn render(&self, item: &T) -> String {
        let text = (self.inner)(item);
        match &self.pattern {
            Some(regex) if regex.is_match(&text) => format!("{} {text}", "!".red()),
            _ => format!("  {text}"),
        }
    }

    /// Consumes the wrapper into a plain [`Renderer`] for a
    /// [`SourceSpec`](crate::deploy::SourceSpec).
    #[must_use]
    pub fn into_renderer(self) -> Renderer<T> {
        Box::new(move |item| self.render(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> impl Fn(&String) -> String + Send + 'static {
        |item: &String| item.clone()
    }

    #[test]
    fn matching_term_is_flagged() {
        let renderer = HighlightRenderer::new(["ml", "llm"], plain()).unwrap();
        let rendered = renderer.render(&"Senior LLM Engineer".to_string());
        assert!(rendered.contains('!'));
        assert!(rendered.contains("Senior LLM Engineer"));
    }

    #[test]
    fn non_matching_item_keeps_alignment() {
        let renderer = HighlightRenderer::new(["ml"], plain()).unwrap();
        let rendered = renderer.render(&"Bakery Manager".to_string());
        assert!(rendered.starts_with("  "));
        assert!(!rendered.contains('!'));
    }

    #[test]
    fn terms_match_on_word_boundaries_only() {
        let renderer = HighlightRenderer::new(["ml"], plain()).unwrap();
        // "html" contains "ml" but not as a word.
        assert!(!renderer.render(&"html wrangler".to_string()).contains('!'));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let renderer = HighlightRenderer::new(["node.js"], plain()).unwrap();
        assert!(renderer.render(&"node.js developer".to_string()).contains('!'));
        // The dot must not act as a wildcard.
        assert!(!renderer.render(&"nodexjs developer".to_string()).contains('!'));
    }

    #[test]
    fn empty_term_set_never_flags() {
        let terms: [&str; 0] = [];
        let renderer = HighlightRenderer::new(terms, plain()).unwrap();
        assert!(!renderer.render(&"anything".to_string()).contains('!'));
    }
}
