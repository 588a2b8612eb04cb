//! Expression tree.
//!
//! Nodes are immutable and children are reference counted, so a subtree can
//! be shared by any number of parents (and by closures that capture a body).
//! Equality is structural: derived `PartialEq` on `Rc<Expr>` compares the
//! pointees, never the pointers.

use serde::Serialize;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    Number(i32),
    Boolean(bool),
    Variable(String),
    Add(Rc<Expr>, Rc<Expr>),
    Multiply(Rc<Expr>, Rc<Expr>),
    /// `lhs == rhs`, structural equality of the two values
    Compare(Rc<Expr>, Rc<Expr>),
    Let {
        name: String,
        rhs: Rc<Expr>,
        body: Rc<Expr>,
    },
    If {
        cond: Rc<Expr>,
        then_: Rc<Expr>,
        else_: Rc<Expr>,
    },
    Function {
        param: String,
        body: Rc<Expr>,
    },
    Call {
        callee: Rc<Expr>,
        arg: Rc<Expr>,
    },
}

// Convenience constructors. Tests and the parser build trees bottom-up and
// these keep the `Rc::new` noise out of both.
impl Expr {
    pub fn num(n: i32) -> Self {
        Expr::Number(n)
    }

    pub fn boolean(b: bool) -> Self {
        Expr::Boolean(b)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn plus(lhs: Expr, rhs: Expr) -> Self {
        Expr::Add(Rc::new(lhs), Rc::new(rhs))
    }

    pub fn times(lhs: Expr, rhs: Expr) -> Self {
        Expr::Multiply(Rc::new(lhs), Rc::new(rhs))
    }

    pub fn compare(lhs: Expr, rhs: Expr) -> Self {
        Expr::Compare(Rc::new(lhs), Rc::new(rhs))
    }

    pub fn let_in(name: impl Into<String>, rhs: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            rhs: Rc::new(rhs),
            body: Rc::new(body),
        }
    }

    pub fn if_then_else(cond: Expr, then_: Expr, else_: Expr) -> Self {
        Expr::If {
            cond: Rc::new(cond),
            then_: Rc::new(then_),
            else_: Rc::new(else_),
        }
    }

    pub fn fun(param: impl Into<String>, body: Expr) -> Self {
        Expr::Function {
            param: param.into(),
            body: Rc::new(body),
        }
    }

    pub fn call(callee: Expr, arg: Expr) -> Self {
        Expr::Call {
            callee: Rc::new(callee),
            arg: Rc::new(arg),
        }
    }
}

impl Expr {
    /// Replace free occurrences of `name` with `replacement`.
    ///
    /// `Function` stops at its own parameter. `Let` binding the same name is
    /// returned untouched as a whole: neither `body` nor `rhs` is rewritten,
    /// even though `rhs` lives in the enclosing scope. `optimize` depends on
    /// this exact shape.
    pub fn subst(&self, name: &str, replacement: &Expr) -> Expr {
        let sub = |e: &Rc<Expr>| Rc::new(e.subst(name, replacement));
        match self {
            Expr::Number(_) | Expr::Boolean(_) => self.clone(),
            Expr::Variable(v) => {
                if v == name {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Expr::Add(lhs, rhs) => Expr::Add(sub(lhs), sub(rhs)),
            Expr::Multiply(lhs, rhs) => Expr::Multiply(sub(lhs), sub(rhs)),
            Expr::Compare(lhs, rhs) => Expr::Compare(sub(lhs), sub(rhs)),
            Expr::Let {
                name: bound,
                rhs,
                body,
            } => {
                if bound == name {
                    self.clone()
                } else {
                    Expr::Let {
                        name: bound.clone(),
                        rhs: sub(rhs),
                        body: sub(body),
                    }
                }
            }
            Expr::If { cond, then_, else_ } => Expr::If {
                cond: sub(cond),
                then_: sub(then_),
                else_: sub(else_),
            },
            Expr::Function { param, body } => {
                if param == name {
                    self.clone()
                } else {
                    Expr::Function {
                        param: param.clone(),
                        body: sub(body),
                    }
                }
            }
            Expr::Call { callee, arg } => Expr::Call {
                callee: sub(callee),
                arg: sub(arg),
            },
        }
    }

    /// Conservative "might not fold to a number" test used by the optimizer.
    ///
    /// Only numeric literals (and arithmetic over them) answer `false`.
    /// Booleans, comparisons, conditionals and functions always answer
    /// `true`; a call answers for its callee; a `Let` answers for what it
    /// optimizes to.
    pub fn contains_free_variable(&self) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(_)
            | Expr::Boolean(_)
            | Expr::If { .. }
            | Expr::Compare(..)
            | Expr::Function { .. } => true,
            Expr::Add(lhs, rhs) | Expr::Multiply(lhs, rhs) => {
                lhs.contains_free_variable() || rhs.contains_free_variable()
            }
            Expr::Call { callee, .. } => callee.contains_free_variable(),
            Expr::Let { .. } => match self.optimize() {
                // Still a Let: its bound expression did not fold.
                Expr::Let { .. } => true,
                folded => folded.contains_free_variable(),
            },
        }
    }
}
