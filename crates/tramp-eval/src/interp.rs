//! Direct recursive evaluator.
//!
//! Same semantics as the step engine, but every nested sub-expression and
//! every call is a native stack frame. Left operands are evaluated before
//! right ones and callees before arguments, so both evaluators report the
//! same error first.

use crate::env::Env;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;
use tramp_ast::Expr;

#[tracing::instrument(level = "debug", skip_all)]
pub fn interp(expr: &Expr, env: &Env) -> Result<Value, EvalError> {
    eval(expr, env)
}

/// Call `callee` with `arg`.
pub fn apply(callee: &Value, arg: Value) -> Result<Value, EvalError> {
    let closure = callee.as_closure()?;
    eval(&closure.body, &closure.env.extend(closure.param.clone(), arg))
}

fn eval(expr: &Expr, env: &Env) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Boolean(b) => Ok(Value::Boolean(*b)),
        Expr::Variable(name) => env.lookup(name),
        Expr::Add(lhs, rhs) => {
            let l = eval(lhs, env)?;
            l.add(&eval(rhs, env)?)
        }
        Expr::Multiply(lhs, rhs) => {
            let l = eval(lhs, env)?;
            l.multiply(&eval(rhs, env)?)
        }
        Expr::Compare(lhs, rhs) => {
            let l = eval(lhs, env)?;
            Ok(Value::Boolean(l == eval(rhs, env)?))
        }
        Expr::Let { name, rhs, body } => {
            let bound = eval(rhs, env)?;
            eval(body, &env.extend(name.clone(), bound))
        }
        Expr::If { cond, then_, else_ } => {
            if eval(cond, env)?.is_truthy() {
                eval(then_, env)
            } else {
                eval(else_, env)
            }
        }
        Expr::Function { param, body } => {
            Ok(Value::closure(param.clone(), Rc::clone(body), env.clone()))
        }
        Expr::Call { callee, arg } => {
            let f = eval(callee, env)?;
            let a = eval(arg, env)?;
            apply(&f, a)
        }
    }
}
