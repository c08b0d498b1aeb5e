use crate::error::{Error, Result};
use crate::lexer::{Span, Token};
use crate::parser::Postfix;
use tracing::{debug, trace};

fn parse_number(literal: &str, span: Span) -> Result<f64> {
    let invalid = || Error::InvalidNumber {
        literal: literal.to_string(),
        span,
    };

    if !literal.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    literal.parse().map_err(|_| invalid())
}

/// Reduces a postfix sequence to a single number.
///
/// Operands are applied in the order they appear: `[.., a, b]` followed by
/// `-` computes `a - b`. Intermediate values may be NaN, the final one may not.
pub fn evaluate(postfix: &Postfix) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for (token, span) in postfix.iter() {
        match token {
            Token::Number(literal) => stack.push(parse_number(literal, *span)?),
            Token::Operator(op) => {
                let found = stack.len();
                let (lhs, rhs) = match (stack.pop(), stack.pop()) {
                    (Some(rhs), Some(lhs)) => (lhs, rhs),
                    _ => {
                        return Err(Error::InsufficientOperands {
                            op: *op,
                            found,
                            span: *span,
                        })
                    }
                };

                let out = op.apply(lhs, rhs);
                trace!(%op, lhs, rhs, out, "applied operator");
                stack.push(out);
            }
            other => {
                return Err(Error::UnknownOperator {
                    symbol: other.name().to_string(),
                    span: *span,
                })
            }
        }
    }

    match stack.as_slice() {
        [result] if !result.is_nan() => {
            debug!(result, "evaluated postfix");
            Ok(*result)
        }
        rest => Err(Error::EmptyOrInvalidResult {
            remaining: rest.len(),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::evaluate;
    use crate::error::Error;
    use crate::lexer::{tokenize_rpn, Op, Span};
    use crate::parser::Postfix;

    fn rpn(string: &str) -> Result<f64, Error> {
        evaluate(&Postfix::from_rpn(tokenize_rpn(string)))
    }

    #[test]
    fn test_basic() {
        assert_eq!(rpn("42").unwrap(), 42.0);
        assert_eq!(rpn("3 4 +").unwrap(), 7.0);
        assert_eq!(rpn("5 5 2 * +").unwrap(), 15.0);
        assert_eq!(rpn("1.5 2 *").unwrap(), 3.0);
    }

    #[test]
    fn test_operand_order() {
        assert_eq!(rpn("8 2 /").unwrap(), 4.0);
        assert_eq!(rpn("8 2 -").unwrap(), 6.0);
        assert_eq!(rpn("2 3 ^").unwrap(), 8.0);
        assert_eq!(rpn("8 4 - 2 -").unwrap(), 2.0);
    }

    #[test]
    fn test_ieee() {
        assert_eq!(rpn("1 0 /").unwrap(), std::f64::INFINITY);
        assert_eq!(rpn("0 1 - 0 /").unwrap(), std::f64::NEG_INFINITY);
        assert_eq!(rpn("4 0.5 ^").unwrap(), 2.0);
        assert_eq!(rpn("2 0 1 - ^").unwrap(), 0.5);
    }

    #[test]
    fn test_nan_result() {
        assert_eq!(
            rpn("0 0 /").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 1 }
        );
        assert_eq!(
            rpn("0 1 - 0.5 ^").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 1 }
        );
        assert_eq!(
            rpn("0 0 / 1 +").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 1 }
        );
        // NaN ^ 0 is 1, so a NaN that does not survive to the end is fine
        assert_eq!(rpn("0 0 / 0 ^").unwrap(), 1.0);
    }

    #[test]
    fn test_insufficient_operands() {
        assert_eq!(
            rpn("1 +").unwrap_err(),
            Error::InsufficientOperands {
                op: Op::Add,
                found: 1,
                span: Span(2, 3),
            }
        );
        assert_eq!(
            rpn("*").unwrap_err(),
            Error::InsufficientOperands {
                op: Op::Mul,
                found: 0,
                span: Span(0, 1),
            }
        );
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            rpn("1 2 %").unwrap_err(),
            Error::UnknownOperator {
                symbol: "%".into(),
                span: Span(4, 5),
            }
        );
        assert_eq!(
            rpn("1 ( +").unwrap_err(),
            Error::UnknownOperator {
                symbol: "(".into(),
                span: Span(2, 3),
            }
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            rpn("1.2.3").unwrap_err(),
            Error::InvalidNumber {
                literal: "1.2.3".into(),
                span: Span(0, 5),
            }
        );
        assert_eq!(
            rpn("1 1e5 +").unwrap_err(),
            Error::InvalidNumber {
                literal: "1e5".into(),
                span: Span(2, 5),
            }
        );
    }

    #[test]
    fn test_leftover_values() {
        assert_eq!(
            rpn("").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 0 }
        );
        assert_eq!(
            rpn("1 2").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 2 }
        );
        assert_eq!(
            rpn("1 2 3 +").unwrap_err(),
            Error::EmptyOrInvalidResult { remaining: 2 }
        );
    }
}
