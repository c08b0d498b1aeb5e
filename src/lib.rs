//! Arithmetic expression evaluation by way of the shunting-yard algorithm.
//!
//! An infix expression is split into tokens, reordered into postfix form and
//! then reduced on a value stack:
//!
//! ```
//! assert_eq!(shunting_calc::evaluate("(5 + 5) * 2"), Ok(20.0));
//! assert_eq!(shunting_calc::to_postfix("5 + 5 * 2").unwrap().to_string(), "5 5 2 * +");
//! assert_eq!(shunting_calc::evaluate_rpn("8 4 - 2 -"), Ok(2.0));
//! ```

pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use error::{Error, Result};
pub use eval::evaluate as evaluate_postfix;
pub use lexer::{Op, Span, Token};
pub use parser::Postfix;

/// Converts an infix expression to postfix order without evaluating it.
pub fn to_postfix(expression: &str) -> Result<Postfix> {
    parser::parse(lexer::tokenize(expression))
}

/// Evaluates an infix expression such as `3 + 4 * 2`.
pub fn evaluate(expression: &str) -> Result<f64> {
    let postfix = to_postfix(expression)?;
    eval::evaluate(&postfix)
}

/// Evaluates whitespace separated postfix text such as `3 4 2 * +`.
pub fn evaluate_rpn(expression: &str) -> Result<f64> {
    eval::evaluate(&Postfix::from_rpn(lexer::tokenize_rpn(expression)))
}
