use thiserror::Error;

/// Recoverable evaluation failures. Each one ends the current evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(Mismatch),
}

/// The ways an operand can have the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Mismatch {
    /// A number was added to or multiplied with a non-number.
    #[error("not a number")]
    NotANumber,
    #[error("cannot add booleans")]
    AddBooleans,
    #[error("cannot multiply booleans")]
    MultiplyBooleans,
    #[error("cannot add functions")]
    AddFunctions,
    #[error("cannot multiply functions")]
    MultiplyFunctions,
    #[error("not callable")]
    NotCallable,
}

impl From<Mismatch> for EvalError {
    fn from(m: Mismatch) -> Self {
        EvalError::TypeMismatch(m)
    }
}
