use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use kaleido_core::{Item, ParseResult, lex, parse};

#[derive(Parser, Debug)]
#[command(version, about = "Lexer and parser front end for the Kaleido language")]
struct Cli {
    /// Source file to parse; omit to start the interactive loop
    #[arg(value_name = "FILE")]
    input: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.input {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

/// Interactive loop: one line at a time, `quit` to leave. Each line is
/// lexed, its token sequence echoed, and the parse outcome reported.
/// Parse errors never end the session.
fn repl() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read line")?;
        if line == "quit" {
            break;
        }

        let tokens = lex(&line);
        println!("{tokens:?}");
        report(&parse(tokens));

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}

/// One-shot mode: parse a whole source file, report every item and
/// diagnostic, and fail the process if anything did not parse.
fn run_file(path: &str) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {path}"))?;

    let result = parse(lex(&source));
    report(&result);

    if !result.diagnostics.is_empty() {
        bail!("{path} contained parse errors");
    }
    Ok(())
}

fn report(result: &ParseResult) {
    for item in &result.items {
        match item {
            Item::Definition(_) => println!("Parsed a function definition."),
            Item::Extern(_) => println!("Parsed an extern."),
            Item::TopLevel(_) => println!("Parsed a top-level expression."),
        }
    }
    for error in &result.diagnostics {
        println!("Error: {error}");
    }
}
