//! Markdown rendering and the raw-HTML trust boundary.
//!
//! Note bodies are markdown converted to HTML by an external collaborator
//! and injected into their table cell unescaped. The conversion itself is
//! out of scope here; this module pins down the boundary: a [`Markup`]
//! value is the only thing the renderer will inject raw, and every note
//! body reaches one only through an explicit render-then-sanitize
//! [`MarkupPipeline`].

use std::fmt;
use std::sync::Arc;

/// HTML destined for raw injection into a table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn from_trusted(html: String) -> Self {
        Self(html)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External markdown-to-HTML converter collaborator.
pub trait MarkdownRenderer: Send + Sync {
    fn to_html(&self, source: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn to_html(&self, source: &str) -> String {
        self(source)
    }
}

/// Post-render HTML sanitizer applied before injection.
pub trait HtmlSanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// Sanitizer that passes converter output through unchanged.
///
/// This reproduces the admin's historical behavior of trusting the
/// converter's output wholesale. Substitute a real sanitizer when note
/// bodies can be attacker-controlled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl HtmlSanitizer for Passthrough {
    fn sanitize(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Render-then-sanitize pipeline applied to every note body.
#[derive(Clone)]
pub struct MarkupPipeline {
    renderer: Arc<dyn MarkdownRenderer>,
    sanitizer: Arc<dyn HtmlSanitizer>,
}

impl MarkupPipeline {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>, sanitizer: Arc<dyn HtmlSanitizer>) -> Self {
        Self {
            renderer,
            sanitizer,
        }
    }

    /// Convert markdown source into injectable markup.
    #[must_use]
    pub fn markup(&self, source: &str) -> Markup {
        Markup(self.sanitizer.sanitize(&self.renderer.to_html(source)))
    }
}

impl fmt::Debug for MarkupPipeline {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("MarkupPipeline").finish_non_exhaustive()
    }
}

/// Escape text for the cells that must never carry markup.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
