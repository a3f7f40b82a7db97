//! monke-error - Diagnostics for the monke language
//!
//! Spans locate tokens and syntax errors in the source; diagnostics turn
//! those errors into compiler-style reports.
//!
//! # Example
//!
//! ```rust
//! use monke_error::{Diagnostic, DiagnosticRenderer, ErrorCode, SourceCache};
//! use monke_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("repl", "let x 5;");
//!
//! let span = Span::new(Position::new(1, 7, 6), Position::new(1, 8, 7), file_id);
//! let diagnostic = Diagnostic::error("expected token kind ASSIGN, found INT")
//!     .with_code(ErrorCode::UNEXPECTED_TOKEN)
//!     .with_label(span, "expected `=` here");
//!
//! let rendered = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);
//! assert!(rendered.contains("repl:1:7"));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, SourceCache, SourceFile};
pub use span::{Position, Span};

/// Diagnostics accumulated over one source unit
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders every diagnostic, separated by blank lines
    pub fn render(&self, renderer: &DiagnosticRenderer<'_>) -> String {
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
