//! Top level items of a translation unit

use super::singletons::{parse_name_identifier, parse_type_identifier};
use super::statement::parse_compound_statement;
use super::{ParseOutcome, SyntacticParser, SyntaxResult};
use cx_ast::{NodeId, NodeKind};
use cx_tokens::{Located, Token, TokenKind};
use tracing::{debug, instrument};

/// Parses a whole token stream, which must end with [TokenKind::Eof]
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse_translation_unit<'p>(tokens: &[Token<'p>]) -> ParseOutcome<'p> {
    let mut parser = SyntacticParser::new(tokens);
    let root = parse_root(&mut parser);
    parser.finish(root)
}

/// Parses function declarations until the end of the stream or the first that does not parse.
/// Whatever follows that declaration is left unparsed.
pub fn parse_root(parser: &mut SyntacticParser<'_, '_>) -> NodeId {
    let root = parser.ast_mut().alloc(None);
    let mut children = vec![];
    while !parser.at_eof() {
        match parser.try_parse(Some(root), parse_function_declaration) {
            Some(child) => children.push(child),
            None => {
                if let Some(token) = parser.peek() {
                    debug!(
                        "stopped parsing top level items at {}, dropping the rest",
                        token.location()
                    );
                }
                break;
            }
        }
    }
    parser.ast_mut().promote(root, NodeKind::Root(children));
    root
}

/// `type name ( ) { ... }`
pub fn parse_function_declaration<'p>(
    parser: &mut SyntacticParser<'_, 'p>,
    node: NodeId,
) -> SyntaxResult<'p> {
    let [data_type, name, body] = parser.ast_mut().alloc_children(node);
    parser.parse(data_type, parse_type_identifier)?;
    parser.parse(name, parse_name_identifier)?;
    parser.expect(TokenKind::OpenParenthesis)?;
    parser.expect(TokenKind::CloseParenthesis)?;
    parser.parse(body, parse_compound_statement)?;
    parser.ast_mut().promote(
        node,
        NodeKind::FunctionDeclaration {
            data_type,
            name,
            body,
        },
    );
    Ok(())
}
