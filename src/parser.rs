use crate::error::{Error, Result};
use crate::lexer::{Lexer, Op, Span, Token};
use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// Tokens in postfix order, each with the span it was read from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Postfix {
    items: Vec<(Token, Span)>,
}

impl Postfix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the tokens as written, without any reordering or checking.
    pub fn from_rpn(mut lexer: Lexer) -> Self {
        let mut out = Self::new();

        loop {
            let span = lexer.span();
            match lexer.next() {
                Token::End => break out,
                token => out.push(token, span),
            }
        }
    }

    fn push(&mut self, token: Token, span: Span) {
        self.items.push((token, span));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Token, Span)> {
        self.items.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.items.iter().map(|(token, _)| token)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

enum Pending {
    Operator(Op),
    LeftParen,
}

/// Shunting-yard conversion of an infix token stream.
///
/// Operators of equal precedence are popped before the new one is pushed, so
/// every operator, `^` included, associates to the left. Parentheses must
/// balance: a `)` without a matching `(`, or a `(` still open at the end of
/// input, is a `MismatchedParenthesis`.
pub fn parse(mut lexer: Lexer) -> Result<Postfix> {
    let mut output = Postfix::new();
    let mut stack: Vec<(Pending, Span)> = vec![];

    debug!(tokens = lexer.len(), "converting to postfix");

    loop {
        let span = lexer.span();

        match lexer.next() {
            Token::End => break,
            Token::Number(x) => output.push(Token::Number(x), span),
            Token::Operator(op) => {
                while let Some(&(Pending::Operator(top), top_span)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }

                    stack.pop();
                    output.push(Token::Operator(top), top_span);
                }

                stack.push((Pending::Operator(op), span));
            }
            Token::LeftParen => stack.push((Pending::LeftParen, span)),
            Token::RightParen => loop {
                match stack.pop() {
                    Some((Pending::Operator(op), op_span)) => {
                        output.push(Token::Operator(op), op_span)
                    }
                    Some((Pending::LeftParen, _)) => break,
                    None => return Err(Error::MismatchedParenthesis { span }),
                }
            },
            Token::Unknown(symbol) => return Err(Error::UnknownOperator { symbol, span }),
        }
    }

    while let Some((pending, span)) = stack.pop() {
        match pending {
            Pending::Operator(op) => output.push(Token::Operator(op), span),
            Pending::LeftParen => return Err(Error::MismatchedParenthesis { span }),
        }
    }

    debug!(postfix = %output, "converted to postfix");
    Ok(output)
}
