use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tramp_cli::{run_source, Mode};

/// Maximum source size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "tramp")]
#[command(about = "Evaluate a tramp expression read from standard input or a file")]
struct Cli {
    /// Print the constant-folded expression instead of evaluating it
    #[arg(long)]
    opt: bool,

    /// Evaluate with the continuation-passing step engine
    #[arg(long = "step_interp", conflicts_with = "opt")]
    step_interp: bool,

    /// Print the parsed expression as JSON
    #[arg(long, conflicts_with_all = ["opt", "step_interp"])]
    dump_ast: bool,

    /// Source file (reads standard input when omitted)
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mode = if cli.opt {
        Mode::Optimize
    } else if cli.step_interp {
        Mode::Step
    } else if cli.dump_ast {
        Mode::DumpAst
    } else {
        Mode::Naive
    };

    let (label, src) = match &cli.file {
        Some(path) => (
            path.display().to_string(),
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => (
            "<stdin>".to_string(),
            std::io::read_to_string(std::io::stdin()).context("failed to read standard input")?,
        ),
    };

    if src.len() > MAX_SOURCE_SIZE {
        eprintln!(
            "Error: source exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
        std::process::exit(1);
    }

    println!("{}", run_source(&label, &src, mode)?);
    Ok(())
}

/// Diagnostics go to stderr, and only when `RUST_LOG` asks for them.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
