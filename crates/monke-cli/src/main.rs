//! monke CLI

mod error;
mod repl;

use clap::{ArgAction, Parser, Subcommand};
use error::{CliError, Result};
use monke_error::{DiagnosticRenderer, SourceCache};
use monke_lexer::Lexer;
use repl::ReplMode;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "monke")]
#[command(version)]
#[command(about = "Front end of the monke language: tokens, syntax trees and a REPL", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Starts the interactive prompt (default)
    Repl {
        /// What to print for each line
        #[arg(short, long, value_enum, default_value_t = ReplMode::Tokens)]
        mode: ReplMode,
    },

    /// Shows file tokens (debug)
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Shows the statements parsed from a file
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Repl {
        mode: ReplMode::default(),
    });

    let result = match command {
        Commands::Repl { mode } => run_repl(mode),
        Commands::Lex { input, json } => lex_file(&input, json),
        Commands::Parse { input } => parse_file(&input),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run_repl(mode: ReplMode) -> Result<ExitCode> {
    println!("{}", repl::greeting());
    repl::start(io::stdin().lock(), io::stdout().lock(), mode)?;
    Ok(ExitCode::SUCCESS)
}

fn lex_file(path: &Path, json: bool) -> Result<ExitCode> {
    let source = read_source(path)?;
    let tokens = Lexer::new(&source).tokenize();
    tracing::info!("{}: {} tokens", path.display(), tokens.len());

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &tokens)?;
        writeln!(out)?;
    } else {
        for token in &tokens {
            writeln!(out, "{}", token)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_file(path: &Path) -> Result<ExitCode> {
    let source = read_source(path)?;

    let mut cache = SourceCache::new();
    let file_id = cache.add(path.display().to_string(), source.as_str());

    let program = monke_parser::Parser::new(Lexer::with_file_id(&source, file_id)).parse_program();
    let diagnostics = program.diagnostics();
    tracing::info!(
        "{}: {} statements, {} errors",
        path.display(),
        program.len(),
        diagnostics.len()
    );

    let mut out = io::stdout().lock();
    for stmt in program.nodes() {
        writeln!(out, "{}", stmt)?;
    }

    if !diagnostics.is_empty() {
        let renderer = DiagnosticRenderer::new(&cache);
        eprintln!("{}", diagnostics.render(&renderer));
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
