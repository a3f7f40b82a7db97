//! Integration tests for the monke language front end
//!
//! Helpers that run source text through the whole pipeline:
//! Source → Lexer → Parser → Program (+ rendered diagnostics)

use monke_error::{DiagnosticRenderer, SourceCache};
use monke_lexer::Lexer;
use monke_parser::{Parser, Program};
use std::io;
use std::path::Path;

/// Result of running one source unit through the front end
#[derive(Debug)]
pub struct ParseOutcome {
    pub program: Program,
    /// Diagnostics rendered without colors, empty when parsing succeeded
    pub rendered_errors: String,
}

impl ParseOutcome {
    pub fn success(&self) -> bool {
        !self.program.has_errors()
    }

    /// Canonical rendering of every statement that parsed
    pub fn rendered(&self) -> Vec<String> {
        self.program.nodes().map(ToString::to_string).collect()
    }
}

/// Parses source text registered under `name`
pub fn parse_named(name: &str, source: &str) -> ParseOutcome {
    let mut cache = SourceCache::new();
    let file_id = cache.add(name, source);

    let program = Parser::new(Lexer::with_file_id(source, file_id)).parse_program();
    let rendered_errors = program
        .diagnostics()
        .render(&DiagnosticRenderer::new(&cache).without_colors());

    ParseOutcome {
        program,
        rendered_errors,
    }
}

pub fn parse_source(source: &str) -> ParseOutcome {
    parse_named("<input>", source)
}

/// Reads and parses a source file
pub fn parse_file(path: &Path) -> io::Result<ParseOutcome> {
    let source = std::fs::read_to_string(path)?;
    Ok(parse_named(&path.display().to_string(), &source))
}

/// Asserts that source code parses without errors
pub fn assert_parses(source: &str) {
    let outcome = parse_source(source);
    if !outcome.success() {
        panic!(
            "Expected source to parse, but got errors:\n{}",
            outcome.rendered_errors
        );
    }
}

/// Asserts that source code produces at least one parse error
pub fn assert_parse_fails(source: &str) {
    let outcome = parse_source(source);
    if outcome.success() {
        panic!("Expected source to fail parsing, but it succeeded");
    }
}

/// Asserts that source code parses and renders to exactly `expected`
pub fn assert_renders(source: &str, expected: &str) {
    let outcome = parse_source(source);
    if !outcome.success() {
        panic!(
            "Expected source to parse, but got errors:\n{}",
            outcome.rendered_errors
        );
    }
    let rendered = outcome.program.to_string();
    if rendered != expected {
        panic!(
            "Rendering mismatch for {:?}\n  expected: {}\n     found: {}",
            source, expected, rendered
        );
    }
}
