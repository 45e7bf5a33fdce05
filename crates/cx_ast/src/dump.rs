//! A structural JSON rendering of a syntax tree

use crate::node::{Ast, NodeId, NodeKind};
use serde_json::{json, Value};

/// Renders the subtree at `id`, one object shape per node kind and `null` for unset nodes.
///
/// Locations are left out, so two trees parsed from differently formatted text compare equal
/// when their structure does.
pub fn dump(ast: &Ast<'_>, id: NodeId) -> Value {
    let all = |children: &[NodeId]| -> Vec<Value> {
        children.iter().map(|&child| dump(ast, child)).collect()
    };
    match ast.kind(id) {
        NodeKind::Unset => Value::Null,
        NodeKind::Root(children) => json!({ "root": { "children": all(children) } }),
        NodeKind::TypeIdentifier(token) => json!({ "type_identifier": token.text() }),
        NodeKind::NameIdentifier(token) => json!({ "name_identifier": token.text() }),
        NodeKind::NumberLiteral(token) => json!({ "number": token.integer() }),
        NodeKind::StringLiteral(token) => {
            json!({ "string": token.bytes().map(String::from_utf8_lossy) })
        }
        NodeKind::ReturnStatement(value) => json!({ "return": dump(ast, *value) }),
        NodeKind::CompoundStatement(children) => json!({ "compound": all(children) }),
        NodeKind::FunctionDeclaration {
            data_type,
            name,
            body,
        } => json!({
            "function": {
                "type": dump(ast, *data_type),
                "name": dump(ast, *name),
                "body": dump(ast, *body),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_tokens::{Location, Token, TokenKind, TokenValue};
    use std::path::Path;
    use test_log::test;

    #[test]
    fn dump_return_statement() {
        let path = Path::new("main.cx");
        let mut ast = Ast::new();
        let statement = ast.alloc(None);
        let [value] = ast.alloc_children(statement);
        ast.promote(statement, NodeKind::ReturnStatement(value));
        assert_eq!(dump(&ast, statement), json!({ "return": null }));

        ast.promote(
            value,
            NodeKind::NumberLiteral(Token::new(
                Location::new(path, 0, 7),
                TokenKind::Number,
                TokenValue::Integer {
                    lexeme: "0",
                    value: 0,
                },
            )),
        );
        assert_eq!(dump(&ast, statement), json!({ "return": { "number": 0 } }));
    }
}
