use crate::lexer::{Op, Span};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading an expression and producing a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A `)` with no open `(` before it, or a `(` that is never closed.
    #[error("mismatched parenthesis at {span}")]
    MismatchedParenthesis { span: Span },

    #[error("unknown operator '{symbol}' at {span}")]
    UnknownOperator { symbol: String, span: Span },

    #[error("operator '{op}' needs two operands, {found} available at {span}")]
    InsufficientOperands { op: Op, found: usize, span: Span },

    #[error("invalid number '{literal}' at {span}")]
    InvalidNumber { literal: String, span: Span },

    /// The value stack did not end with exactly one value, or that value is NaN.
    #[error("expression did not reduce to a single number ({remaining} left)")]
    EmptyOrInvalidResult { remaining: usize },
}

impl Error {
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::MismatchedParenthesis { span }
            | Error::UnknownOperator { span, .. }
            | Error::InsufficientOperands { span, .. }
            | Error::InvalidNumber { span, .. } => Some(*span),
            Error::EmptyOrInvalidResult { .. } => None,
        }
    }
}
