//! ffigen CLI - FFI binding generator for C libraries

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use ffigen::bindings::{ContractError, DecodeError, DefinitionDecoder, EmitFormat, RunReport};
use ffigen::ops::{generate_bindings, GenerateOptions};
use ffigen::util::diagnostic::{self, suggestions, Diagnostic};

fn main() {
    // Parse CLI; a missing --library exits here, before any input is read
    let cli = Cli::parse();
    let color = !cli.no_color && io::stderr().is_terminal();

    if cli.library.trim().is_empty() {
        let diag = Diagnostic::error("library identifier is empty")
            .with_suggestion(suggestions::MISSING_LIBRARY);
        diagnostic::emit(&diag, color);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, color) {
        if let Some(contract) = e.downcast_ref::<ContractError>() {
            diagnostic::emit(&contract.to_diagnostic(), color);
        } else if let Some(decode) = e.downcast_ref::<DecodeError>() {
            diagnostic::emit(&decode.to_diagnostic(), color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ffigen=debug")
    } else if cli.quiet {
        EnvFilter::new("ffigen=error")
    } else {
        EnvFilter::new("ffigen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    let format: EmitFormat = cli.emit.parse()?;

    let decoder = DefinitionDecoder::new();
    let stream = match &cli.input {
        Some(path) => decoder.decode_file(path)?,
        None => decoder.decode_reader(io::stdin().lock())?,
    };

    let opts = GenerateOptions::new(cli.library.as_str()).with_format(format);
    let result = generate_bindings(&stream, &opts)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &result.artifact)
                .with_context(|| format!("failed to write bindings: {}", path.display()))?;
            tracing::info!("Wrote {} symbols to {}", result.symbols.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(result.artifact.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write bindings to stdout")?;
        }
    }

    if result.symbols.is_empty() && result.stats.functions.total > 0 && !cli.quiet {
        let diag = Diagnostic::warning("no functions could be bound").with_context(format!(
            "all {} function declarations were skipped",
            result.stats.functions.total
        ));
        diagnostic::emit(&diag, color);
    }

    eprint!("{}", RunReport::new(&result.stats));

    Ok(())
}
