//! Renders a syntax tree back into c source text

use crate::type_alias::TypeAliasTable;
use cx_ast::{Ast, AstVisitor, NodeId};
use cx_tokens::Token;
use std::convert::Infallible;
use tracing::instrument;

/// Options that change how a tree is rendered
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Render type aliases as the keyword they stand for
    pub translate_type_aliases: bool,
}

/// Writes the tree into a string, indenting nested blocks with one tab per level
#[derive(Debug)]
pub struct Emitter<'a> {
    out: String,
    depth: usize,
    type_aliases: &'a TypeAliasTable,
    options: EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(type_aliases: &'a TypeAliasTable, options: EmitOptions) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            type_aliases,
            options,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
    }

    fn text(&mut self, token: &Token<'_>) {
        if let Some(text) = token.text() {
            self.out.push_str(text);
        }
    }
}

impl<'p> AstVisitor<'p> for Emitter<'_> {
    type Err = Infallible;

    fn visit_root(
        &mut self,
        ast: &Ast<'p>,
        _id: NodeId,
        children: &[NodeId],
    ) -> Result<(), Self::Err> {
        for &child in children {
            self.visit_node(ast, child)?;
            self.out.push('\n');
        }
        Ok(())
    }

    fn visit_type_identifier(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        let type_aliases = self.type_aliases;
        let keyword = token
            .text()
            .filter(|_| self.options.translate_type_aliases)
            .and_then(|alias| type_aliases.get(alias));
        match keyword {
            Some(keyword) => self.out.push_str(keyword),
            None => self.text(token),
        }
        Ok(())
    }

    fn visit_name_identifier(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        self.text(token);
        Ok(())
    }

    fn visit_number_literal(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        self.text(token);
        Ok(())
    }

    fn visit_string_literal(
        &mut self,
        _ast: &Ast<'p>,
        _id: NodeId,
        token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        let body = token.bytes().map(String::from_utf8_lossy).unwrap_or_default();
        self.out.push('"');
        self.out.push_str(&body);
        self.out.push('"');
        Ok(())
    }

    fn visit_return_statement(
        &mut self,
        ast: &Ast<'p>,
        _id: NodeId,
        value: NodeId,
    ) -> Result<(), Self::Err> {
        self.indent();
        self.out.push_str("return ");
        self.visit_node(ast, value)?;
        self.out.push_str(";\n");
        Ok(())
    }

    fn visit_compound_statement(
        &mut self,
        ast: &Ast<'p>,
        _id: NodeId,
        children: &[NodeId],
    ) -> Result<(), Self::Err> {
        self.indent();
        self.out.push_str("{\n");
        self.depth += 1;
        for &child in children {
            self.visit_node(ast, child)?;
        }
        self.depth -= 1;
        self.indent();
        self.out.push_str("}\n");
        Ok(())
    }

    fn visit_function_declaration(
        &mut self,
        ast: &Ast<'p>,
        _id: NodeId,
        data_type: NodeId,
        name: NodeId,
        body: NodeId,
    ) -> Result<(), Self::Err> {
        self.indent();
        self.visit_node(ast, data_type)?;
        self.out.push(' ');
        self.visit_node(ast, name)?;
        self.out.push_str("()\n");
        self.visit_node(ast, body)
    }
}

/// Renders the subtree at `root`.
///
/// Numbers are written as they appeared in the source, so a literal that wrapped while being
/// decoded still reads back the same.
#[instrument(skip_all)]
pub fn emit(
    ast: &Ast<'_>,
    root: NodeId,
    type_aliases: &TypeAliasTable,
    options: EmitOptions,
) -> String {
    let mut emitter = Emitter::new(type_aliases, options);
    match emitter.visit_node(ast, root) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    emitter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_ast::NodeKind;
    use cx_ast_parsing::lexer::tokenize;
    use cx_ast_parsing::parser::parse_translation_unit;
    use cx_tokens::SourceFile;
    use test_log::test;

    fn emit_source(src: &str, options: EmitOptions) -> String {
        let source = SourceFile::new("main.cx", src);
        let tokens = tokenize(&source).unwrap();
        let outcome = parse_translation_unit(&tokens);
        assert!(!outcome.has_errors());
        emit(&outcome.ast, outcome.root, &TypeAliasTable::default(), options)
    }

    #[test]
    fn emit_function() {
        let output = emit_source("i32 main() { return 0; }", EmitOptions::default());
        assert_eq!(output, "i32 main()\n{\n\treturn 0;\n}\n\n");
    }

    #[test]
    fn emit_nested_blocks() {
        let output = emit_source(
            "i32 main() { { return 1; } return 2; } u8 f() { }",
            EmitOptions::default(),
        );
        assert_eq!(
            output,
            "i32 main()\n{\n\t{\n\t\treturn 1;\n\t}\n\treturn 2;\n}\n\nu8 f()\n{\n}\n\n"
        );
    }

    #[test]
    fn aliases_are_kept_unless_translated() {
        let options = EmitOptions {
            translate_type_aliases: true,
        };
        let output = emit_source("i32 main() { return 0; } foo bar() { }", options);
        assert!(output.starts_with("signed int main()\n"));
        assert!(output.contains("foo bar()\n"));
    }

    #[test]
    fn emit_string_literal() {
        let source = SourceFile::new("main.cx", r#""a\"b""#);
        let tokens = tokenize(&source).unwrap();
        let mut ast = Ast::new();
        let node = ast.alloc(None);
        ast.promote(node, NodeKind::StringLiteral(tokens[0].clone()));
        let output = emit(&ast, node, &TypeAliasTable::default(), EmitOptions::default());
        assert_eq!(output, r#""a\"b""#);
    }

    #[test]
    fn unset_nodes_emit_nothing() {
        let mut ast = Ast::new();
        let node = ast.alloc(None);
        let output = emit(&ast, node, &TypeAliasTable::default(), EmitOptions::default());
        assert_eq!(output, "");
    }

    #[test]
    fn numbers_keep_their_digits() {
        let output = emit_source(
            "i32 main() { return 9223372036854775808; }",
            EmitOptions::default(),
        );
        assert!(
            output.contains("\treturn 9223372036854775808;\n"),
            "{output}"
        );
    }
}
