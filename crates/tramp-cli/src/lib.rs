#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Driver shared by the `tramp` binary and its tests.

use anyhow::Result;
use tracing::info;
use tramp_eval::Env;
use tramp_parse::parse_str;

/// What to do with the parsed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the constant-folded expression.
    Optimize,
    /// Evaluate with the continuation-passing step engine.
    Step,
    /// Evaluate with the direct recursive evaluator.
    Naive,
    /// Print the parsed tree as JSON.
    DumpAst,
}

/// Parse `src` and produce the single line of output for `mode`, without the
/// trailing newline. `file` labels parse errors.
pub fn run_source(file: &str, src: &str, mode: Mode) -> Result<String> {
    let expr = parse_str(file, src)?;
    info!(?mode, "parsed {file}");

    let out = match mode {
        Mode::Optimize => format!("The optimization result is : {}", expr.optimize()),
        Mode::Step => format!("The interp_by_steps result is : {}", tramp_eval::evaluate(expr)?),
        Mode::Naive => format!(
            "The interpretation result is : {}",
            tramp_eval::interp(&expr, &Env::empty())?
        ),
        Mode::DumpAst => serde_json::to_string_pretty(&expr)?,
    };
    Ok(out)
}
