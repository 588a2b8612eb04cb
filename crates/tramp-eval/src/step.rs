//! The trampoline.
//!
//! A [`Machine`] is either evaluating an expression or resuming its
//! continuation with a value. [`Machine::step`] performs one transition and
//! returns the next machine by value; [`Machine::run`] loops until the value
//! reaches the empty continuation. Nothing here recurses on the native stack.

use crate::cont::{Continuation, Frame};
use crate::env::Env;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;
use tracing::debug;
use tramp_ast::Expr;

#[derive(Debug, Clone)]
pub enum Mode {
    Evaluating { expr: Rc<Expr>, env: Env },
    Resuming { value: Value },
}

/// Complete engine state. Each evaluation owns its own machine.
#[derive(Debug, Clone)]
pub struct Machine {
    mode: Mode,
    cont: Continuation,
}

#[derive(Debug)]
pub enum Step {
    Continue(Machine),
    Finished(Value),
}

/// Result of [`Machine::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub value: Value,
    /// Transitions taken, including the final one.
    pub steps: u64,
    /// Deepest continuation seen.
    pub max_depth: usize,
}

impl Machine {
    /// A machine about to evaluate `expr` under `env` with nothing left to do
    /// afterwards.
    pub fn new(expr: impl Into<Rc<Expr>>, env: Env) -> Self {
        Machine::evaluating(expr.into(), env, Continuation::done())
    }

    pub(crate) fn evaluating(expr: Rc<Expr>, env: Env, cont: Continuation) -> Self {
        Machine {
            mode: Mode::Evaluating { expr, env },
            cont,
        }
    }

    pub(crate) fn resuming(value: Value, cont: Continuation) -> Self {
        Machine {
            mode: Mode::Resuming { value },
            cont,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn continuation(&self) -> &Continuation {
        &self.cont
    }

    pub fn step(self) -> Result<Step, EvalError> {
        let Machine { mode, cont } = self;
        match mode {
            Mode::Resuming { value } if cont.is_done() => Ok(Step::Finished(value)),
            Mode::Resuming { value } => cont.resume(value).map(Step::Continue),
            Mode::Evaluating { expr, env } => dispatch(expr, env, cont).map(Step::Continue),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(self) -> Result<Outcome, EvalError> {
        let mut steps = 0u64;
        let mut max_depth = self.cont.depth();
        let mut machine = self;
        loop {
            steps += 1;
            match machine.step()? {
                Step::Continue(next) => {
                    max_depth = max_depth.max(next.cont.depth());
                    machine = next;
                }
                Step::Finished(value) => {
                    debug!(steps, max_depth, "evaluation finished");
                    return Ok(Outcome {
                        value,
                        steps,
                        max_depth,
                    });
                }
            }
        }
    }
}

/// Evaluate a closed expression with the step engine.
pub fn evaluate(expr: impl Into<Rc<Expr>>) -> Result<Value, EvalError> {
    Machine::new(expr, Env::empty()).run().map(|o| o.value)
}

fn dispatch(expr: Rc<Expr>, env: Env, cont: Continuation) -> Result<Machine, EvalError> {
    let next = match &*expr {
        Expr::Number(n) => Machine::resuming(Value::Number(*n), cont),
        Expr::Boolean(b) => Machine::resuming(Value::Boolean(*b), cont),
        Expr::Variable(name) => Machine::resuming(env.lookup(name)?, cont),
        Expr::Function { param, body } => {
            Machine::resuming(Value::closure(param.clone(), Rc::clone(body), env), cont)
        }

        Expr::Add(lhs, rhs) => {
            let k = cont.push(Frame::AwaitAddRight {
                rhs: Rc::clone(rhs),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(lhs), env, k)
        }
        Expr::Multiply(lhs, rhs) => {
            let k = cont.push(Frame::AwaitMultiplyRight {
                rhs: Rc::clone(rhs),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(lhs), env, k)
        }
        Expr::Compare(lhs, rhs) => {
            let k = cont.push(Frame::AwaitCompareRight {
                rhs: Rc::clone(rhs),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(lhs), env, k)
        }

        Expr::Let { name, rhs, body } => {
            let k = cont.push(Frame::AwaitLetBody {
                name: name.clone(),
                body: Rc::clone(body),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(rhs), env, k)
        }
        Expr::If { cond, then_, else_ } => {
            let k = cont.push(Frame::AwaitIfBranch {
                then_: Rc::clone(then_),
                else_: Rc::clone(else_),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(cond), env, k)
        }
        Expr::Call { callee, arg } => {
            let k = cont.push(Frame::AwaitCallArgument {
                arg: Rc::clone(arg),
                env: env.clone(),
            });
            Machine::evaluating(Rc::clone(callee), env, k)
        }
    };
    Ok(next)
}
