//! The arena that owns every node of a syntax tree

use cx_tokens::{Located, Location, Token};
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// The index of a node within its [Ast]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A length of the arena that allocations can later be released back to
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Mark(usize);

/// The kind of a node, along with the children or token it owns
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind<'p> {
    /// A slot that has been allocated but not matched yet
    Unset,
    Root(Vec<NodeId>),
    TypeIdentifier(Token<'p>),
    NameIdentifier(Token<'p>),
    NumberLiteral(Token<'p>),
    StringLiteral(Token<'p>),
    ReturnStatement(NodeId),
    CompoundStatement(Vec<NodeId>),
    FunctionDeclaration {
        data_type: NodeId,
        name: NodeId,
        body: NodeId,
    },
}

impl<'p> NodeKind<'p> {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The token of a leaf node
    pub fn token(&self) -> Option<&Token<'p>> {
        match self {
            NodeKind::TypeIdentifier(token)
            | NodeKind::NameIdentifier(token)
            | NodeKind::NumberLiteral(token)
            | NodeKind::StringLiteral(token) => Some(token),
            _ => None,
        }
    }

    /// The children owned by this node, in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Root(children) | NodeKind::CompoundStatement(children) => children.clone(),
            NodeKind::ReturnStatement(value) => vec![*value],
            NodeKind::FunctionDeclaration {
                data_type,
                name,
                body,
            } => vec![*data_type, *name, *body],
            _ => vec![],
        }
    }
}

/// A single node in the arena
#[derive(Debug, Clone)]
pub struct Node<'p> {
    parent: Option<NodeId>,
    kind: NodeKind<'p>,
}

impl<'p> Node<'p> {
    /// The node that owns this one. This never owns anything itself.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind<'p> {
        &self.kind
    }
}

/// Owns every node of a syntax tree.
///
/// Nodes are allocated [Unset](NodeKind::Unset) and promoted once the production that
/// owns them matches. A failed attempt gives its nodes back with [Ast::release_from].
#[derive(Debug, Clone, Default)]
pub struct Ast<'p> {
    nodes: Vec<Node<'p>>,
}

impl<'p> Ast<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates a new unset node
    pub fn alloc(&mut self, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            kind: NodeKind::Unset,
        });
        id
    }

    /// Eagerly allocates `N` unset child slots of `parent`
    pub fn alloc_children<const N: usize>(&mut self, parent: NodeId) -> [NodeId; N] {
        std::array::from_fn(|_| self.alloc(Some(parent)))
    }

    /// Stamps the final kind of a node
    pub fn promote(&mut self, id: NodeId, kind: NodeKind<'p>) {
        self.nodes[id.0].kind = kind;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<'p>> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind<'p> {
        &self[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Every node enclosing `id`, innermost first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&parent| self.parent(parent))
    }

    /// The location of the first token under `id`, if any
    pub fn location(&self, id: NodeId) -> Option<Location<'p>> {
        let kind = self.kind(id);
        match kind.token() {
            Some(token) => Some(token.location()),
            None => kind
                .children()
                .into_iter()
                .find_map(|child| self.location(child)),
        }
    }

    /// Marks the current end of the arena
    pub fn mark(&self) -> Mark {
        Mark(self.nodes.len())
    }

    /// Releases every node allocated since `mark`
    pub fn release_from(&mut self, mark: Mark) {
        self.nodes.truncate(mark.0);
    }
}

impl<'p> Index<NodeId> for Ast<'p> {
    type Output = Node<'p>;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_tokens::{TokenKind, TokenValue};
    use std::path::Path;
    use test_log::test;

    fn name(text: &'static str, column: usize) -> Token<'static> {
        Token::new(
            Location::new(Path::new("main.cx"), 0, column),
            TokenKind::Name,
            TokenValue::Text(text),
        )
    }

    #[test]
    fn release_from_mark_drops_attempt() {
        let mut ast = Ast::new();
        let root = ast.alloc(None);
        let mark = ast.mark();
        let [a, b, c] = ast.alloc_children(root);
        assert_eq!(ast.parent(a), Some(root));
        assert_eq!(ast.parent(c), Some(root));
        assert_ne!(a, b);
        assert_eq!(ast.len(), 4);
        ast.release_from(mark);
        assert_eq!(ast.len(), 1);
        assert!(ast.get(a).is_none());
    }

    #[test]
    fn ancestors_are_innermost_first() {
        let mut ast = Ast::new();
        let root = ast.alloc(None);
        let function = ast.alloc(Some(root));
        let [data_type] = ast.alloc_children(function);
        assert_eq!(ast.ancestors(data_type).collect::<Vec<_>>(), vec![function, root]);
        assert_eq!(ast.ancestors(root).count(), 0);
    }

    #[test]
    fn location_of_first_leaf() {
        let mut ast = Ast::new();
        let root = ast.alloc(None);
        let function = ast.alloc(Some(root));
        let [data_type, name_id, body] = ast.alloc_children(function);
        ast.promote(data_type, NodeKind::TypeIdentifier(name("i32", 0)));
        ast.promote(name_id, NodeKind::NameIdentifier(name("main", 4)));
        ast.promote(
            function,
            NodeKind::FunctionDeclaration {
                data_type,
                name: name_id,
                body,
            },
        );
        ast.promote(root, NodeKind::Root(vec![function]));
        assert_eq!(ast.location(root).map(|l| l.column()), Some(0));
        assert_eq!(ast.location(body), None);
        assert_eq!(ast.kind(function).name(), "function_declaration");
    }
}
