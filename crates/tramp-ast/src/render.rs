//! Surface rendering.
//!
//! The output is the concrete syntax the parser reads, without adding any
//! parentheses, so rendering is not always a faithful inverse of parsing:
//! `(_fun (x) x)(1)` renders as `_fun (x) x(1)`.

use crate::ast::Expr;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Boolean(true) => write!(f, "_true"),
            Expr::Boolean(false) => write!(f, "_false"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Add(lhs, rhs) => write!(f, "{lhs} + {rhs}"),
            Expr::Multiply(lhs, rhs) => write!(f, "{lhs} * {rhs}"),
            Expr::Compare(lhs, rhs) => write!(f, "{lhs} == {rhs}"),
            Expr::Let { name, rhs, body } => write!(f, "_let {name} = {rhs} _in {body}"),
            Expr::If { cond, then_, else_ } => {
                write!(f, "_if {cond} _then {then_} _else {else_}")
            }
            Expr::Function { param, body } => write!(f, "_fun ({param}) {body}"),
            Expr::Call { callee, arg } => write!(f, "{callee}({arg})"),
        }
    }
}
