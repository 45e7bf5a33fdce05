//! Responsible with converting a [SourceFile] into a token stream

use crate::lexer::token_parsing::{parse_insignificant, parse_token};
use cx_tokens::{Located, Location, SourceFile, Token, TokenKind, TokenValue};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::trace;

mod token_parsing;

/// Responsible with converting a [SourceFile] into a token stream.
///
/// The column of a token is always derived from the offset of the start of its line.
#[derive(Debug)]
pub struct Lexer<'p> {
    source: &'p SourceFile,
    cursor: usize,
    line_start: usize,
    line: usize,
}

impl<'p> Lexer<'p> {
    /// Creates a new lexer at the start of the source
    pub fn new(source: &'p SourceFile) -> Self {
        Self {
            source,
            cursor: 0,
            line_start: 0,
            line: 0,
        }
    }

    /// The location of the next unscanned byte
    pub fn location(&self) -> Location<'p> {
        Location::new(self.source.path(), self.line, self.cursor - self.line_start)
    }

    fn rest(&self) -> &'p [u8] {
        &self.source.bytes()[self.cursor..]
    }

    fn is_empty(&self) -> bool {
        self.cursor >= self.source.bytes().len()
    }

    fn chop(&mut self, len: usize) {
        for &byte in self.rest().iter().take(len) {
            self.cursor += 1;
            if byte == b'\n' {
                self.line += 1;
                self.line_start = self.cursor;
            }
        }
    }

    fn skip_insignificant(&mut self) {
        let src = self.rest();
        if let Ok((rest, ())) = parse_insignificant(src) {
            self.chop(src.len() - rest.len());
        }
    }

    /// Scans the next token, returning `None` at the end of input
    pub fn next_token(&mut self) -> LexResult<'p, Option<Token<'p>>> {
        self.skip_insignificant();
        if self.is_empty() {
            return Ok(None);
        }
        let location = self.location();
        let src = self.rest();
        match parse_token(src) {
            Ok((rest, (kind, value))) => {
                self.chop(src.len() - rest.len());
                let token = Token::new(location, kind, value);
                trace!("scanned {token}");
                Ok(Some(token))
            }
            Err(nom::Err::Failure(_)) => Err(LexingError::UnterminatedLiteral {
                location,
                literal: if src.starts_with(b"'") {
                    Literal::Char
                } else {
                    Literal::String
                },
            }),
            Err(_) => Err(LexingError::UnknownToken {
                location,
                byte: src.first().copied().unwrap_or_default(),
            }),
        }
    }

    /// The terminating token, located at the end of input
    pub fn eof_token(&self) -> Token<'p> {
        Token::new(self.location(), TokenKind::Eof, TokenValue::Text(""))
    }
}

impl<'p> Iterator for Lexer<'p> {
    type Item = LexResult<'p, Token<'p>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Scans a whole source file, ending the tokens with exactly one [TokenKind::Eof]
pub fn tokenize(source: &SourceFile) -> LexResult<'_, Vec<Token<'_>>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = lexer.by_ref().collect::<Result<Vec<_>, _>>()?;
    tokens.push(lexer.eof_token());
    trace!("scanned {} tokens from {:?}", tokens.len(), source.path());
    Ok(tokens)
}

pub type LexResult<'p, T> = Result<T, LexingError<'p>>;

/// The kind of an unterminated literal
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Literal {
    String,
    Char,
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String => write!(f, "string"),
            Literal::Char => write!(f, "character"),
        }
    }
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}

#[derive(Debug, Error)]
pub enum LexingError<'p> {
    #[error("unknown token starts with {:?} = {byte:#x} = {byte}", as_char(.byte))]
    UnknownToken { location: Location<'p>, byte: u8 },
    #[error("unterminated {literal} literal")]
    UnterminatedLiteral {
        location: Location<'p>,
        literal: Literal,
    },
}

impl<'p> Located<'p> for LexingError<'p> {
    fn location(&self) -> Location<'p> {
        match self {
            LexingError::UnknownToken { location, .. }
            | LexingError::UnterminatedLiteral { location, .. } => *location,
        }
    }
}
