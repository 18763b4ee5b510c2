//! Tabula Shell
//!
//! Reads commands from a script or stdin and runs them against a database.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use tabula::shell::{parse_command, Command, Output};
use tabula::{Config, Database};
use tracing_subscriber::{fmt, EnvFilter};

/// Tabula shell
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(about = "Single-table store with ordered column indexes")]
#[command(version)]
struct Args {
    /// Branching factor for new indexes (minimum 3)
    #[arg(short, long, default_value_t = tabula::config::DEFAULT_INDEX_ORDER)]
    order: usize,

    /// Field delimiter for table files
    #[arg(short, long, default_value_t = tabula::config::DEFAULT_DELIMITER)]
    delimiter: char,

    /// Table to load at startup, as <table>=<file>
    #[arg(short, long, value_parser = parse_load_spec)]
    load: Option<(String, PathBuf)>,

    /// Run commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() {
    // Logs go to stderr so stdout carries only command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tabula=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Tabula v{}", tabula::VERSION);

    let config = Config::builder()
        .index_order(args.order)
        .delimiter(args.delimiter)
        .build();

    let mut db = match Database::new(config) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Some((table, path)) = args.load {
        if let Err(e) = db.execute(Command::Load { table, path }) {
            tracing::error!("Failed to load table: {}", e);
            std::process::exit(1);
        }
    }

    let result = match args.script {
        Some(path) => match File::open(&path) {
            Ok(file) => run(&mut db, BufReader::new(file), false),
            Err(e) => {
                tracing::error!("Failed to open script {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => run(&mut db, io::stdin().lock(), true),
    };

    if let Err(e) = result {
        tracing::error!("I/O error: {}", e);
        std::process::exit(1);
    }
}

/// Execute commands line by line until end of input or `quit`
///
/// Command failures are reported and the session continues.
fn run<R: BufRead>(db: &mut Database, input: R, prompt: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    if prompt {
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    for line in input.lines() {
        let line = line?;

        match parse_command(&line).and_then(|cmd| cmd.map(|c| db.execute(c)).transpose()) {
            Ok(Some(Output::Quit)) => break,
            Ok(Some(output)) => writeln!(stdout, "{}", output)?,
            Ok(None) => {}
            Err(e) => tracing::warn!("{}: {}", line.trim(), e),
        }

        if prompt {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Parse `<table>=<file>`
fn parse_load_spec(spec: &str) -> Result<(String, PathBuf), String> {
    match spec.split_once('=') {
        Some((table, file)) if !table.is_empty() && !file.is_empty() => {
            Ok((table.to_string(), PathBuf::from(file)))
        }
        _ => Err(format!("expected <table>=<file>, got '{}'", spec)),
    }
}
