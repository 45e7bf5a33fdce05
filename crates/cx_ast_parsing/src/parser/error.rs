use cx_tokens::{Located, Location, Token, TokenKind};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError<'p> {
    pub location: Option<Location<'p>>,
    pub kind: ErrorKind<'p>,
    pub non_terminal_stack: Vec<&'static str>,
}

impl<'p> SyntaxError<'p> {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind<'p>,
        location: Option<Location<'p>>,
        non_terminals: Vec<&'static str>,
    ) -> Self {
        Self {
            location,
            kind,
            non_terminal_stack: non_terminals,
        }
    }
}

impl Display for SyntaxError<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// [SyntaxError] kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind<'p> {
    #[error("expected {} but got {}", .0.iter().join(" or "), found(.1))]
    ExpectedToken(Vec<TokenKind>, Option<Token<'p>>),
    #[error("expected `{}` but got {}", .0, found(.1))]
    ExpectedKeyword(&'static str, Option<Token<'p>>),
}

impl<'p> ErrorKind<'p> {
    pub fn expected_token(
        token_kinds: impl IntoIterator<Item = TokenKind>,
        found: impl Into<Option<Token<'p>>>,
    ) -> Self {
        Self::ExpectedToken(token_kinds.into_iter().collect(), found.into())
    }

    /// The token that was found instead of what was expected
    pub fn found(&self) -> Option<&Token<'p>> {
        match self {
            ErrorKind::ExpectedToken(_, found) | ErrorKind::ExpectedKeyword(_, found) => {
                found.as_ref()
            }
        }
    }
}

fn found(token: &Option<Token<'_>>) -> String {
    match token {
        None => "nothing".to_string(),
        Some(token) if token.kind() == TokenKind::Eof => "end of file".to_string(),
        Some(token) => match token.text() {
            Some(text) if token.kind() == TokenKind::Name => format!("{} `{text}`", token.kind()),
            _ => token.kind().to_string(),
        },
    }
}

impl<'p> SyntaxError<'p> {
    /// Where this error occurred, falling back to the location of the token found instead
    pub fn location(&self) -> Option<Location<'p>> {
        self.location
            .or_else(|| self.kind.found().map(|token| token.location()))
    }
}

pub type SyntaxResult<'p, T = ()> = std::result::Result<T, super::Err<SyntaxError<'p>>>;

#[cfg(test)]
mod tests {
    use super::*;
    use cx_tokens::TokenValue;
    use std::path::Path;
    use test_log::test;

    #[test]
    fn expected_token_message() {
        let semi = Token::new(
            Location::new(Path::new("main.cx"), 0, 19),
            TokenKind::Semicolon,
            TokenValue::Byte(b';'),
        );
        let error = SyntaxError::new(
            ErrorKind::expected_token([TokenKind::Number], semi),
            None,
            vec![],
        );
        assert_eq!(error.to_string(), "expected NUMBER but got SEMICOLON");
        assert_eq!(error.location().map(|l| l.column()), Some(19));
    }

    #[test]
    fn expected_keyword_message() {
        let name = Token::new(
            Location::new(Path::new("main.cx"), 0, 0),
            TokenKind::Name,
            TokenValue::Text("retrun"),
        );
        let kind = ErrorKind::ExpectedKeyword("return", Some(name));
        assert_eq!(kind.to_string(), "expected `return` but got NAME `retrun`");
    }
}
