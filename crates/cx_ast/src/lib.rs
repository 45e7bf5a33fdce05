//! The syntax tree of a cx translation unit.
//!
//! Nodes live in an [Ast] arena and refer to each other by [NodeId].

pub mod dump;
pub mod node;
pub mod visitor;

pub use node::{Ast, Mark, Node, NodeId, NodeKind};
pub use visitor::AstVisitor;
