//! A lexical token from a source file

use crate::location::{Located, Location};
use std::fmt::{Display, Formatter};

/// A lexical token from a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'p> {
    location: Location<'p>,
    kind: TokenKind,
    value: TokenValue<'p>,
}

impl<'p> Token<'p> {
    /// Creates a new token
    pub fn new(location: Location<'p>, kind: TokenKind, value: TokenValue<'p>) -> Self {
        Self {
            location,
            kind,
            value,
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &TokenValue<'p> {
        &self.value
    }

    /// The borrowed text of names, numbers and operators, and of literal bodies that are
    /// valid utf-8
    pub fn text(&self) -> Option<&'p str> {
        match self.value {
            TokenValue::Text(text) | TokenValue::Integer { lexeme: text, .. } => Some(text),
            TokenValue::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            TokenValue::Byte(_) => None,
        }
    }

    /// The exact source bytes of names, numbers, operators and literal bodies
    pub fn bytes(&self) -> Option<&'p [u8]> {
        match self.value {
            TokenValue::Text(text) | TokenValue::Integer { lexeme: text, .. } => {
                Some(text.as_bytes())
            }
            TokenValue::Bytes(bytes) => Some(bytes),
            TokenValue::Byte(_) => None,
        }
    }

    /// The decoded value of a number
    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Integer { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Checks whether this token is a name with exactly the given text
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.text() == Some(name)
    }
}

impl<'p> Located<'p> for Token<'p> {
    fn location(&self) -> Location<'p> {
        self.location
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)?;
        match (self.kind, &self.value) {
            (TokenKind::Name, TokenValue::Text(text)) => write!(f, " '{text}'"),
            (TokenKind::Char, TokenValue::Bytes(body)) => {
                write!(f, " '{}'", String::from_utf8_lossy(body))
            }
            (TokenKind::String, TokenValue::Bytes(body)) => {
                write!(f, " \"{}\"", String::from_utf8_lossy(body))
            }
            (TokenKind::Number, TokenValue::Integer { value, .. }) => write!(f, " {value}"),
            _ => Ok(()),
        }
    }
}

/// The payload of a token, selected by its [TokenKind]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenValue<'p> {
    /// Names and operator lexemes, borrowed from the source
    Text(&'p str),
    /// The raw body of a string or character literal, which may hold any byte
    Bytes(&'p [u8]),
    /// Single character punctuation
    Byte(u8),
    /// A decimal number, as written and decoded with wrapping arithmetic
    Integer { lexeme: &'p str, value: i64 },
}

/// The kind for this token
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Name,
    /// (
    OpenParenthesis,
    /// )
    CloseParenthesis,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// [
    OpenSquare,
    /// ]
    CloseSquare,
    Dot,
    Comma,
    Semicolon,
    Colon,
    Equals,
    LessThan,
    GreaterThan,
    /// !
    Not,

    // literals
    Number,
    String,
    Char,

    Plus,
    PlusEquals,
    PlusPlus,
    Minus,
    MinusEquals,
    MinusMinus,
    /// ->
    Arrow,
    Asterisk,
    TimesEquals,
    Slash,
    DivideEquals,
    Ampersand,
    AndEquals,
    /// &&
    LogicAnd,
    Pipe,
    OrEquals,
    /// ||
    LogicOr,
    /// ^
    Xor,
    XorEquals,
    /// %
    Mod,
    ModEquals,

    /// End of input
    Eof,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use strum::IntoEnumIterator;
    use test_log::test;

    fn at(column: usize) -> Location<'static> {
        Location::new(Path::new("main.cx"), 2, column)
    }

    #[test]
    fn kind_names_are_screaming_snake_case() {
        assert_eq!(TokenKind::OpenParenthesis.to_string(), "OPEN_PARENTHESIS");
        assert_eq!(TokenKind::PlusEquals.to_string(), "PLUS_EQUALS");
        let name: &'static str = TokenKind::LogicOr.into();
        assert_eq!(name, "LOGIC_OR");
        assert_eq!(TokenKind::iter().count(), 40);
    }

    #[test]
    fn display_includes_value_by_kind() {
        let name = Token::new(at(0), TokenKind::Name, TokenValue::Text("main"));
        assert_eq!(name.to_string(), "main.cx:3:1: NAME 'main'");

        let string = Token::new(at(4), TokenKind::String, TokenValue::Bytes(b"hi\\n"));
        assert_eq!(string.to_string(), "main.cx:3:5: STRING \"hi\\n\"");

        let number = Token::new(
            at(7),
            TokenKind::Number,
            TokenValue::Integer {
                lexeme: "42",
                value: 42,
            },
        );
        assert_eq!(number.to_string(), "main.cx:3:8: NUMBER 42");
        assert_eq!(number.text(), Some("42"));

        let semi = Token::new(at(9), TokenKind::Semicolon, TokenValue::Byte(b';'));
        assert_eq!(semi.to_string(), "main.cx:3:10: SEMICOLON");
    }

    #[test]
    fn literal_bodies_keep_raw_bytes() {
        let string = Token::new(at(0), TokenKind::String, TokenValue::Bytes(b"caf\xe9"));
        assert_eq!(string.bytes(), Some(&b"caf\xe9"[..]));
        assert_eq!(string.text(), None);
        assert_eq!(string.to_string(), "main.cx:3:1: STRING \"caf\u{FFFD}\"");
    }

    #[test]
    fn keywords_are_matched_by_value() {
        let token = Token::new(at(0), TokenKind::Name, TokenValue::Text("return"));
        assert!(token.is_name("return"));
        assert!(!token.is_name("ret"));
    }
}
