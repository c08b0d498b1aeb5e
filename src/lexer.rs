use std::fmt;
use std::iter::{Fuse, Peekable};
use std::str::Chars;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Unknown(String),
    Number(String),
    Operator(Op),
    End,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        let op = match c {
            '+' => Op::Add,
            '-' => Op::Sub,
            '*' | '×' => Op::Mul,
            '/' => Op::Div,
            '^' => Op::Pow,
            _ => return None,
        };

        Some(op)
    }

    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Pow => 3,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
            Op::Pow => lhs.powf(rhs),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Token {
    pub fn name(&self) -> &str {
        match self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Number(x) => x,
            Token::Unknown(x) => x,
            Token::Operator(x) => x.name(),
            Token::End => "<end>",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Half-open range of character offsets into the scanned line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Span(pub usize, pub usize);

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

struct CharStream<'a> {
    index: usize,
    iterator: Peekable<Fuse<Chars<'a>>>,
}

impl<'a> CharStream<'a> {
    fn new(line: &'a str) -> CharStream<'a> {
        Self {
            index: 0,
            iterator: line.chars().fuse().peekable(),
        }
    }

    fn next(&mut self) -> Option<char> {
        let c = self.iterator.next();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }
}

pub struct Lexer {
    index: usize,
    tokens: Vec<Token>,
    spans: Vec<Span>,
    end: Span,
}

impl Lexer {
    const DIGITS: &'static str = "0123456789.";

    fn parse_token(stream: &mut CharStream, c: char) -> Token {
        if c.is_ascii_digit() {
            let mut buffer = String::new();

            while let Some(c) = stream.peek().filter(|&c| Self::DIGITS.contains(c)) {
                buffer.push(c);
                stream.next();
            }

            return Token::Number(buffer);
        }

        stream.next();

        match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c => match Op::from_char(c) {
                Some(op) => Token::Operator(op),
                None => Token::Unknown(c.to_string()),
            },
        }
    }

    fn parse_word(stream: &mut CharStream, _: char) -> Token {
        let mut buffer = String::new();

        while let Some(c) = stream.peek().filter(|c| !c.is_whitespace()) {
            buffer.push(c);
            stream.next();
        }

        if buffer.starts_with(|c: char| c.is_ascii_digit()) {
            return Token::Number(buffer);
        }

        let mut chars = buffer.chars();
        match (chars.next(), chars.next()) {
            (Some('('), None) => Token::LeftParen,
            (Some(')'), None) => Token::RightParen,
            (Some(c), None) => match Op::from_char(c) {
                Some(op) => Token::Operator(op),
                None => Token::Unknown(buffer),
            },
            _ => Token::Unknown(buffer),
        }
    }

    fn new(line: &str, parse: fn(&mut CharStream, char) -> Token) -> Lexer {
        let mut stream = CharStream::new(line);
        let mut tokens = vec![];
        let mut spans = vec![];

        while let Some(c) = stream.peek() {
            if c.is_whitespace() {
                stream.next();
                continue;
            }

            let begin = stream.index;
            let token = parse(&mut stream, c);
            let end = stream.index;
            tokens.push(token);
            spans.push(Span(begin, end));
        }

        let index = stream.index;

        Lexer {
            index: 0,
            tokens,
            spans,
            end: Span(index, index + 1),
        }
    }

    pub fn peek(&self) -> Token {
        self.tokens.get(self.index).cloned().unwrap_or(Token::End)
    }

    pub fn next(&mut self) -> Token {
        let tok = self.peek();
        self.index += 1;
        tok
    }

    pub fn span(&self) -> Span {
        self.spans.get(self.index).copied().unwrap_or(self.end)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits an infix expression into numbers, operators and parentheses.
pub fn tokenize(line: &str) -> Lexer {
    Lexer::new(line, Lexer::parse_token)
}

/// Splits whitespace separated postfix text, one token per word.
pub fn tokenize_rpn(line: &str) -> Lexer {
    Lexer::new(line, Lexer::parse_word)
}
