//! Productions that match exactly one token

use super::{SyntacticParser, SyntaxResult};
use cx_ast::{NodeId, NodeKind};
use cx_tokens::TokenKind;

macro_rules! token_singleton {
    ($(#[$meta:meta])* $name:ident, $kind:path => $node:path) => {
        $(#[$meta])*
        pub fn $name<'p>(parser: &mut SyntacticParser<'_, 'p>, node: NodeId) -> SyntaxResult<'p> {
            let token = parser.expect($kind)?.clone();
            parser.ast_mut().promote(node, $node(token));
            Ok(())
        }
    };
}

token_singleton!(
    /// The name of a type, checked against the known aliases later
    parse_type_identifier,
    TokenKind::Name => NodeKind::TypeIdentifier
);
token_singleton!(parse_name_identifier, TokenKind::Name => NodeKind::NameIdentifier);
token_singleton!(parse_number_literal, TokenKind::Number => NodeKind::NumberLiteral);
token_singleton!(
    /// Not reachable from any statement yet
    parse_string_literal,
    TokenKind::String => NodeKind::StringLiteral
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::test_parser;
    use test_log::test;

    #[test]
    fn test_parse_string_literal() {
        test_parser(r#""hello\tworld""#, |parser| {
            let node = parser.try_parse(None, parse_string_literal).unwrap();
            let NodeKind::StringLiteral(token) = parser.ast().kind(node) else {
                panic!("expected a string literal");
            };
            assert_eq!(token.text(), Some(r"hello\tworld"));
        });
    }

    #[test]
    fn test_parse_number_literal() {
        test_parser("12", |parser| {
            let node = parser.try_parse(None, parse_number_literal).unwrap();
            assert_eq!(
                parser.ast().kind(node).token().and_then(|t| t.integer()),
                Some(12)
            );
            assert!(parser.at_eof());
        });
    }
}
