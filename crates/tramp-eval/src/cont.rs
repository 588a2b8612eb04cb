//! Reified control stack.
//!
//! A [`Continuation`] is a linked chain of pending [`Frame`]s ending in the
//! terminal `Done` (an empty chain). Every frame owns the rest of the chain,
//! and resuming a frame with a value hands back the next machine state.

use crate::env::Env;
use crate::error::EvalError;
use crate::step::Machine;
use crate::value::Value;
use std::rc::Rc;
use tracing::trace;
use tramp_ast::Expr;

/// One unit of pending work. The value a frame is resumed with is named in
/// each variant's docs.
#[derive(Debug, Clone)]
pub enum Frame {
    /// Resumed with the left operand of `+`.
    AwaitAddRight { rhs: Rc<Expr>, env: Env },
    /// Resumed with the right operand of `+`.
    CombineAdd { lhs: Value },
    AwaitMultiplyRight { rhs: Rc<Expr>, env: Env },
    CombineMultiply { lhs: Value },
    AwaitCompareRight { rhs: Rc<Expr>, env: Env },
    CombineCompare { lhs: Value },
    /// Resumed with the bound value.
    AwaitLetBody {
        name: String,
        body: Rc<Expr>,
        env: Env,
    },
    /// Resumed with the condition.
    AwaitIfBranch {
        then_: Rc<Expr>,
        else_: Rc<Expr>,
        env: Env,
    },
    /// Resumed with the callee.
    AwaitCallArgument { arg: Rc<Expr>, env: Env },
    /// Resumed with the argument.
    InvokeWith { callee: Value },
}

#[derive(Debug, Clone, Default)]
pub struct Continuation {
    head: Option<Rc<Node>>,
}

#[derive(Debug)]
struct Node {
    frame: Frame,
    rest: Continuation,
    depth: usize,
}

impl Continuation {
    pub fn done() -> Self {
        Continuation { head: None }
    }

    pub fn is_done(&self) -> bool {
        self.head.is_none()
    }

    /// Number of frames above `Done`.
    pub fn depth(&self) -> usize {
        self.head.as_ref().map_or(0, |n| n.depth)
    }

    pub fn push(self, frame: Frame) -> Continuation {
        let depth = self.depth() + 1;
        Continuation {
            head: Some(Rc::new(Node {
                frame,
                rest: self,
                depth,
            })),
        }
    }

    /// Innermost pending frame, `None` for `Done`.
    pub fn top(&self) -> Option<&Frame> {
        self.head.as_deref().map(|n| &n.frame)
    }

    /// Feed `value` to the innermost frame.
    ///
    /// # Panics
    ///
    /// Resuming `Done` is an engine bug, not a user error: the driver loop
    /// finishes instead of resuming an empty chain.
    pub fn resume(mut self, value: Value) -> Result<Machine, EvalError> {
        let Some(node) = self.head.take() else {
            unreachable!("internal protocol violation: resumed the Done continuation");
        };
        let (frame, rest) = match Rc::try_unwrap(node) {
            Ok(Node { frame, rest, .. }) => (frame, rest),
            Err(shared) => (shared.frame.clone(), shared.rest.clone()),
        };

        let next = match frame {
            Frame::AwaitAddRight { rhs, env } => {
                Machine::evaluating(rhs, env, rest.push(Frame::CombineAdd { lhs: value }))
            }
            Frame::CombineAdd { lhs } => Machine::resuming(lhs.add(&value)?, rest),

            Frame::AwaitMultiplyRight { rhs, env } => {
                Machine::evaluating(rhs, env, rest.push(Frame::CombineMultiply { lhs: value }))
            }
            Frame::CombineMultiply { lhs } => Machine::resuming(lhs.multiply(&value)?, rest),

            Frame::AwaitCompareRight { rhs, env } => {
                Machine::evaluating(rhs, env, rest.push(Frame::CombineCompare { lhs: value }))
            }
            Frame::CombineCompare { lhs } => Machine::resuming(Value::Boolean(lhs == value), rest),

            Frame::AwaitLetBody { name, body, env } => {
                Machine::evaluating(body, env.extend(name, value), rest)
            }

            Frame::AwaitIfBranch { then_, else_, env } => {
                let branch = if value.is_truthy() { then_ } else { else_ };
                Machine::evaluating(branch, env, rest)
            }

            Frame::AwaitCallArgument { arg, env } => {
                Machine::evaluating(arg, env, rest.push(Frame::InvokeWith { callee: value }))
            }

            // The body runs directly on `rest`: a call in tail position adds
            // no frame.
            Frame::InvokeWith { callee } => {
                let closure = callee.as_closure()?;
                trace!(param = %closure.param, depth = rest.depth(), "invoke closure");
                Machine::evaluating(
                    Rc::clone(&closure.body),
                    closure.env.extend(closure.param.clone(), value),
                    rest,
                )
            }
        };
        Ok(next)
    }
}

// A deep chain would otherwise drop one node per native stack frame.
impl Drop for Continuation {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.rest.head.take(),
                Err(_) => break,
            }
        }
    }
}
