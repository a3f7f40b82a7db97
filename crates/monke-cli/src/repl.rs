//! Interactive prompt
//!
//! Reads one line at a time and echoes what the front end makes of it.
//! Typing `bye` ends the session.

use clap::ValueEnum;
use monke_lexer::Lexer;
use monke_parser::parse;
use std::io::{self, BufRead, Write};

pub const PROMPT_IN: &str = "monke<< ";
pub const PROMPT_OUT: &str = "monke > ";
const EXIT_WORD: &str = "bye";

/// What the REPL prints for each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReplMode {
    /// Every token the lexer produces
    #[default]
    Tokens,
    /// Parsed statements and parse errors
    Ast,
}

/// Greeting shown when the REPL starts
pub fn greeting() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "friend".to_string());
    format!(
        "Welcome {},\nThis is monke v{} REPL, write '{}' to exit",
        user,
        env!("CARGO_PKG_VERSION"),
        EXIT_WORD
    )
}

/// Runs the prompt loop until `bye` or end of input
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, mode: ReplMode) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT_IN)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let source = line.trim_end_matches(&['\n', '\r'][..]);
        if source.trim() == EXIT_WORD {
            writeln!(output, "{}Goodbye !", PROMPT_OUT)?;
            return Ok(());
        }

        match mode {
            ReplMode::Tokens => echo_tokens(source, &mut output)?,
            ReplMode::Ast => echo_program(source, &mut output)?,
        }
    }
}

fn echo_tokens<W: Write>(source: &str, output: &mut W) -> io::Result<()> {
    for token in Lexer::new(source) {
        writeln!(output, "{}{}", PROMPT_OUT, token)?;
    }
    Ok(())
}

fn echo_program<W: Write>(source: &str, output: &mut W) -> io::Result<()> {
    let program = parse(source);
    tracing::debug!("{} statements, {} errors", program.len(), program.errors().count());

    for entry in &program.statements {
        match (&entry.statement, &entry.error) {
            (_, Some(err)) => writeln!(output, "{}{}", PROMPT_OUT, err.to_diagnostic())?,
            (Some(stmt), None) => writeln!(output, "{}{}", PROMPT_OUT, stmt)?,
            (None, None) => {}
        }
    }
    Ok(())
}
