//! Statements found in the body of a function

use super::singletons::parse_number_literal;
use super::{Err, SyntacticParser, SyntaxResult};
use cx_ast::{NodeId, NodeKind};
use cx_tokens::TokenKind;

/// A return or a nested block
pub fn parse_statement<'p>(parser: &mut SyntacticParser<'_, 'p>, node: NodeId) -> SyntaxResult<'p> {
    parser.alt(
        node,
        &mut [&mut parse_return_statement, &mut parse_compound_statement],
    )
}

/// `{` followed by statements until the first one that does not parse, then `}`
pub fn parse_compound_statement<'p>(
    parser: &mut SyntacticParser<'_, 'p>,
    node: NodeId,
) -> SyntaxResult<'p> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut children = vec![];
    while let Some(child) = parser.try_parse(Some(node), parse_statement) {
        children.push(child);
    }
    parser.expect(TokenKind::CloseCurly)?;
    parser
        .ast_mut()
        .promote(node, NodeKind::CompoundStatement(children));
    Ok(())
}

/// `return` must be followed by a value, which is a hard error when missing
pub fn parse_return_statement<'p>(
    parser: &mut SyntacticParser<'_, 'p>,
    node: NodeId,
) -> SyntaxResult<'p> {
    parser.expect_keyword("return")?;
    let [value] = parser.ast_mut().alloc_children(node);
    parser
        .parse(value, parse_number_literal)
        .map_err(Err::cut)?;
    parser.expect(TokenKind::Semicolon)?;
    parser
        .ast_mut()
        .promote(node, NodeKind::ReturnStatement(value));
    Ok(())
}
