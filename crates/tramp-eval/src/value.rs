//! Runtime values.

use crate::env::Env;
use crate::error::{EvalError, Mismatch};
use std::fmt;
use std::rc::Rc;
use tramp_ast::Expr;

#[derive(Debug, Clone)]
pub enum Value {
    /// 32-bit machine integer; arithmetic wraps
    Number(i32),
    Boolean(bool),
    Closure(Rc<Closure>),
}

/// A function value: parameter, body, and the environment that was current
/// when the `_fun` literal was evaluated.
#[derive(Debug)]
pub struct Closure {
    pub param: String,
    pub body: Rc<Expr>,
    pub env: Env,
}

impl Value {
    pub fn closure(param: impl Into<String>, body: Rc<Expr>, env: Env) -> Self {
        Value::Closure(Rc::new(Closure {
            param: param.into(),
            body,
            env,
        }))
    }

    /// Addition with unsigned 32-bit wraparound: both operands are read as
    /// `u32`, summed modulo 2^32 and read back as `i32`, so
    /// `i32::MAX + 1 == i32::MIN` and `-1 + -1 == -2`.
    pub fn add(&self, other: &Value) -> Result<Value, EvalError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Ok(Value::Number((*a as u32).wrapping_add(*b as u32) as i32))
            }
            (Value::Number(_), _) => Err(Mismatch::NotANumber.into()),
            (Value::Boolean(_), _) => Err(Mismatch::AddBooleans.into()),
            (Value::Closure(_), _) => Err(Mismatch::AddFunctions.into()),
        }
    }

    /// Multiplication, wrapping at 32 bits.
    pub fn multiply(&self, other: &Value) -> Result<Value, EvalError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_mul(*b))),
            (Value::Number(_), _) => Err(Mismatch::NotANumber.into()),
            (Value::Boolean(_), _) => Err(Mismatch::MultiplyBooleans.into()),
            (Value::Closure(_), _) => Err(Mismatch::MultiplyFunctions.into()),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0,
            Value::Boolean(b) => *b,
            Value::Closure(_) => false,
        }
    }

    /// The closure to invoke when this value is in call position.
    pub fn as_closure(&self) -> Result<&Closure, EvalError> {
        match self {
            Value::Closure(c) => Ok(c),
            Value::Number(_) | Value::Boolean(_) => Err(Mismatch::NotCallable.into()),
        }
    }

    /// Literal expression for this value. A closure becomes its `_fun`
    /// literal; the captured environment is dropped.
    pub fn to_expression(&self) -> Expr {
        match self {
            Value::Number(n) => Expr::Number(*n),
            Value::Boolean(b) => Expr::Boolean(*b),
            Value::Closure(c) => Expr::Function {
                param: c.param.clone(),
                body: Rc::clone(&c.body),
            },
        }
    }
}

/// Closures compare by parameter name and body only. Two closures with the
/// same code but different captured bindings are equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => a.param == b.param && a.body == b.body,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(true) => write!(f, "_true"),
            Value::Boolean(false) => write!(f, "_false"),
            Value::Closure(c) => write!(f, "_fun ({}) {}", c.param, c.body),
        }
    }
}
