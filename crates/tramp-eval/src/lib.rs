#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

//! Evaluation for the tramp language.
//!
//! [`Machine`] is the continuation-passing step engine: it keeps "what is
//! left to do" in an explicit [`Continuation`] chain instead of the native
//! call stack, and tail calls reuse the caller's continuation, so deep
//! recursion in the evaluated program never turns into deep recursion here.
//! [`interp`] is the direct recursive evaluator with the same semantics,
//! kept as a reference for testing.

mod cont;
mod env;
mod error;
mod interp;
mod step;
mod value;

pub use cont::{Continuation, Frame};
pub use env::Env;
pub use error::{EvalError, Mismatch};
pub use interp::{apply, interp};
pub use step::{evaluate, Machine, Mode, Outcome, Step};
pub use value::{Closure, Value};
