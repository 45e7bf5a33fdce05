//! Checks a parsed syntax tree for errors the grammar can not catch

use crate::type_alias::TypeAliasTable;
use cx_ast::{Ast, AstVisitor, NodeId, NodeKind};
use cx_tokens::{Located, Location, Token};
use std::convert::Infallible;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticError<'p> {
    #[error("unknown data type: {name}")]
    UnknownDataType {
        name: &'p str,
        location: Location<'p>,
        /// The function the type was used in
        function: Option<&'p str>,
    },
}

impl<'p> Located<'p> for SemanticError<'p> {
    fn location(&self) -> Location<'p> {
        match self {
            SemanticError::UnknownDataType { location, .. } => *location,
        }
    }
}

/// Walks the whole tree, collecting every error instead of stopping at the first.
#[derive(Debug)]
pub struct SemanticChecker<'a, 'p> {
    type_aliases: &'a TypeAliasTable,
    errors: Vec<SemanticError<'p>>,
}

impl<'a, 'p> SemanticChecker<'a, 'p> {
    pub fn new(type_aliases: &'a TypeAliasTable) -> Self {
        Self {
            type_aliases,
            errors: vec![],
        }
    }

    pub fn into_errors(self) -> Vec<SemanticError<'p>> {
        self.errors
    }
}

/// The name of the function declaring `id`, found through its ancestors
fn enclosing_function<'p>(ast: &Ast<'p>, id: NodeId) -> Option<&'p str> {
    ast.ancestors(id).find_map(|ancestor| match ast.kind(ancestor) {
        NodeKind::FunctionDeclaration { name, .. } => {
            ast.kind(*name).token().and_then(|token| token.text())
        }
        _ => None,
    })
}

impl<'a, 'p> AstVisitor<'p> for SemanticChecker<'a, 'p> {
    type Err = Infallible;

    fn visit_type_identifier(
        &mut self,
        ast: &Ast<'p>,
        id: NodeId,
        token: &Token<'p>,
    ) -> Result<(), Self::Err> {
        let Some(name) = token.text() else {
            return Ok(());
        };
        if !self.type_aliases.contains(name) {
            let function = enclosing_function(ast, id);
            debug!(?function, "unknown data type {name:?} at {}", token.location());
            self.errors.push(SemanticError::UnknownDataType {
                name,
                location: token.location(),
                function,
            });
        }
        Ok(())
    }
}

/// Checks every node under `root`
#[instrument(skip_all)]
pub fn check<'p>(
    ast: &Ast<'p>,
    root: NodeId,
    type_aliases: &TypeAliasTable,
) -> Vec<SemanticError<'p>> {
    let mut checker = SemanticChecker::new(type_aliases);
    match checker.visit_node(ast, root) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    checker.into_errors()
}
