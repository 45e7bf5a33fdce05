//! Translates cx source files into c.
//!
//! A translation runs four passes over a single [SourceFile]: lexical analysis, parsing,
//! semantic analysis and code generation. Must be configured using a [CompilerBuilder].

pub mod compiler;
pub mod diagnostics;
pub mod emit;
pub mod semantic;
pub mod type_alias;

pub use compiler::{Compilation, CompileError, Compiler, CompilerBuilder};
pub use cx_tokens::SourceFile;
pub use diagnostics::Diagnostic;
pub use emit::EmitOptions;
pub use type_alias::{ParseTypeAliasError, TypeAlias, TypeAliasTable};
