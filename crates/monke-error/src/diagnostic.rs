//! Diagnostic - structured error reports
//!
//! A diagnostic is rendered in the familiar compiler layout:
//!
//! ```text
//! error[EP001]: expected token kind ASSIGN, found INT
//!  --> main.mk:1:7
//!   |
//! 1 | let x 5;
//!   |       ^ expected `=` after the binding name
//!   = help: a let statement reads `let <name> = <value>;`
//! ```

use crate::span::Span;
use std::fmt;

/// Stable error code, rendered as `E<category><number>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// `L` for lexical problems, `P` for syntax problems
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Lexer errors
    pub const ILLEGAL_CHAR: Self = Self::new('L', 1);
    pub const INVALID_NUMBER: Self = Self::new('L', 3);

    // Parser errors
    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
    pub const EXPECTED_EXPRESSION: Self = Self::new('P', 2);
    pub const NESTING_TOO_DEEP: Self = Self::new('P', 3);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A message attached to a region of source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A complete error report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    /// One-line form, `error[EP001]: message`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A named source text, with line offsets for snippet lookup
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Text of a 1-indexed line, without its line terminator
    pub fn line(&self, line: u32) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }
}

/// Sources known to the renderer, indexed by `Span::file_id`
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source and returns the id its spans should carry
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics against the sources in a `SourceCache`
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let blue = self.paint("\x1b[1;34m");
        let color = self.paint("\x1b[1;31m");

        let mut out = String::new();
        out.push_str(color);
        out.push_str("error");
        if let Some(code) = diagnostic.code {
            out.push_str(&format!("[{}]", code));
        }
        out.push_str(&format!("{reset}{bold}: {}{reset}\n", diagnostic.message));

        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };
            let start = label.span.start;
            out.push_str(&format!(
                " {blue}-->{reset} {}:{}:{}\n",
                file.name, start.line, start.column
            ));

            let Some(text) = file.line(start.line) else {
                continue;
            };
            let gutter = " ".repeat(start.line.to_string().len());
            let width = if label.span.end.line == start.line {
                label.span.len().max(1)
            } else {
                text
                    .len()
                    .saturating_sub((start.column as usize).saturating_sub(1))
                    .max(1)
            };
            let indent = " ".repeat((start.column as usize).saturating_sub(1));

            out.push_str(&format!(" {gutter} {blue}|{reset}\n"));
            out.push_str(&format!(" {blue}{}{reset} {blue}|{reset} {}\n", start.line, text));
            out.push_str(&format!(
                " {gutter} {blue}|{reset} {indent}{color}{}{reset} {}\n",
                "^".repeat(width),
                label.message
            ));
        }

        for help in &diagnostic.help {
            out.push_str(&format!("  = {bold}help{reset}: {}\n", help));
        }

        out
    }
}
