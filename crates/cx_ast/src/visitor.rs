//! Traversal of an [Ast], one method per node kind.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which recurses into the
//! children of the node. Implementors override only the kinds they care about and call the
//! `walk_*` function themselves when they still want to descend.

use crate::node::{Ast, NodeId, NodeKind};
use cx_tokens::Token;

pub trait AstVisitor<'p> {
    type Err;

    fn visit_node(&mut self, ast: &Ast<'p>, id: NodeId) -> Result<(), Self::Err> {
        walk_node(self, ast, id)
    }

    fn visit_root(
        &mut self,
        ast: &Ast<'p>,
        id: NodeId,
        children: &[NodeId],
    ) -> Result<(), Self::Err> {
        walk_children(self, ast, id, children)
    }

    fn visit_type_identifier(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        _token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_name_identifier(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        _token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_number_literal(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        _token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_string_literal(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        _token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        Ok(())
    }

    fn visit_return_statement(
        &mut self,
        ast: &Ast<'p>,
        id: NodeId,
        value: NodeId,
    ) -> Result<(), Self::Err> {
        walk_return_statement(self, ast, id, value)
    }

    fn visit_compound_statement(
        &mut self,
        ast: &Ast<'p>,
        id: NodeId,
        children: &[NodeId],
    ) -> Result<(), Self::Err> {
        walk_children(self, ast, id, children)
    }

    fn visit_function_declaration(
        &mut self,
        ast: &Ast<'p>,
        id: NodeId,
        data_type: NodeId,
        name: NodeId,
        body: NodeId,
    ) -> Result<(), Self::Err> {
        walk_function_declaration(self, ast, id, data_type, name, body)
    }
}

/// Dispatches on the kind of `id`. [Unset](NodeKind::Unset) nodes visit nothing.
pub fn walk_node<'p, V: AstVisitor<'p> + ?Sized>(
    visitor: &mut V,
    ast: &Ast<'p>,
    id: NodeId,
) -> Result<(), V::Err> {
    match ast.kind(id) {
        NodeKind::Unset => Ok(()),
        NodeKind::Root(children) => visitor.visit_root(ast, id, children),
        NodeKind::TypeIdentifier(token) => visitor.visit_type_identifier(ast, id, token),
        NodeKind::NameIdentifier(token) => visitor.visit_name_identifier(ast, id, token),
        NodeKind::NumberLiteral(token) => visitor.visit_number_literal(ast, id, token),
        NodeKind::StringLiteral(token) => visitor.visit_string_literal(ast, id, token),
        NodeKind::ReturnStatement(value) => visitor.visit_return_statement(ast, id, *value),
        NodeKind::CompoundStatement(children) => {
            visitor.visit_compound_statement(ast, id, children)
        }
        NodeKind::FunctionDeclaration {
            data_type,
            name,
            body,
        } => visitor.visit_function_declaration(ast, id, *data_type, *name, *body),
    }
}

pub fn walk_children<'p, V: AstVisitor<'p> + ?Sized>(
    visitor: &mut V,
    ast: &Ast<'p>,
    _id: NodeId,
    children: &[NodeId],
) -> Result<(), V::Err> {
    for &child in children {
        visitor.visit_node(ast, child)?;
    }
    Ok(())
}

pub fn walk_return_statement<'p, V: AstVisitor<'p> + ?Sized>(
    visitor: &mut V,
    ast: &Ast<'p>,
    _id: NodeId,
    value: NodeId,
) -> Result<(), V::Err> {
    visitor.visit_node(ast, value)
}

pub fn walk_function_declaration<'p, V: AstVisitor<'p> + ?Sized>(
    visitor: &mut V,
    ast: &Ast<'p>,
    _id: NodeId,
    data_type: NodeId,
    name: NodeId,
    body: NodeId,
) -> Result<(), V::Err> {
    visitor.visit_node(ast, data_type)?;
    visitor.visit_node(ast, name)?;
    visitor.visit_node(ast, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_tokens::{Location, TokenKind, TokenValue};
    use std::convert::Infallible;
    use std::path::Path;
    use test_log::test;

    #[derive(Default)]
    struct LeafCollector {
        leaves: Vec<String>,
    }

    impl<'p> AstVisitor<'p> for LeafCollector {
        type Err = Infallible;

        fn visit_type_identifier(
            &mut self,
            _ast: &Ast<'p>,
            _id: NodeId,
            token: &Token<'p>,
        ) -> Result<(), Self::Err> {
            self.leaves.push(format!("type {}", token.text().unwrap_or_default()));
            Ok(())
        }

        fn visit_number_literal(
            &mut self,
            _ast: &Ast<'p>,
            _id: NodeId,
            token: &Token<'p>,
        ) -> Result<(), Self::Err> {
            self.leaves.push(format!("number {}", token.integer().unwrap_or_default()));
            Ok(())
        }
    }

    #[test]
    fn walks_children_in_order_and_skips_unset() {
        let path = Path::new("main.cx");
        let mut ast = Ast::new();
        let root = ast.alloc(None);
        let function = ast.alloc(Some(root));
        let [data_type, name, body] = ast.alloc_children(function);
        ast.promote(
            data_type,
            NodeKind::TypeIdentifier(Token::new(
                Location::new(path, 0, 0),
                TokenKind::Name,
                TokenValue::Text("i32"),
            )),
        );
        let first = ast.alloc(Some(body));
        let [value] = ast.alloc_children(first);
        ast.promote(
            value,
            NodeKind::NumberLiteral(Token::new(
                Location::new(path, 0, 20),
                TokenKind::Number,
                TokenValue::Integer {
                    lexeme: "7",
                    value: 7,
                },
            )),
        );
        ast.promote(first, NodeKind::ReturnStatement(value));
        let second = ast.alloc(Some(body));
        let [unset] = ast.alloc_children(second);
        ast.promote(second, NodeKind::ReturnStatement(unset));
        ast.promote(body, NodeKind::CompoundStatement(vec![first, second]));
        ast.promote(
            function,
            NodeKind::FunctionDeclaration {
                data_type,
                name,
                body,
            },
        );
        ast.promote(root, NodeKind::Root(vec![function]));

        let mut collector = LeafCollector::default();
        collector.visit_node(&ast, root).unwrap();
        assert_eq!(collector.leaves, vec!["type i32", "number 7"]);
    }
}
