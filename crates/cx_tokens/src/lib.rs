//! Source buffers, locations within them and the lexical tokens scanned from them.

pub mod location;
pub mod source;
pub mod token;

pub use location::{Located, Location};
pub use source::SourceFile;
pub use token::{Token, TokenKind, TokenValue};
