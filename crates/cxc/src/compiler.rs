//! Responsible with translating a cx source file into c

use crate::diagnostics::Diagnostic;
use crate::emit::{emit, EmitOptions};
use crate::semantic::check;
use crate::type_alias::{TypeAlias, TypeAliasTable};
use cx_ast::dump::dump;
use cx_ast_parsing::lexer::{tokenize, LexingError};
use cx_ast_parsing::parser::parse_translation_unit;
use cx_tokens::{Located, SourceFile};
use itertools::Itertools;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Responsible with translating a cx source file into c.
///
/// Must be configured using a [CompilerBuilder].
#[derive(Debug)]
pub struct Compiler {
    type_aliases: TypeAliasTable,
    emit_options: EmitOptions,
    dump_tokens: bool,
    dump_ast: bool,
    emit: bool,
}

impl Compiler {
    /// Creates the default CompilerBuilder
    #[inline]
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn type_aliases(&self) -> &TypeAliasTable {
        &self.type_aliases
    }

    /// Reads and compiles the file at a given path
    pub fn compile_path(&self, path: &Path) -> Result<Compilation, CompileError> {
        let source = SourceFile::read(path).map_err(|error| CompileError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        self.compile(&source)
    }

    /// Compiles a source file that is already in memory.
    ///
    /// Hard parse errors stop the translation before semantic analysis, but are still reported
    /// as diagnostics of a [Compilation] instead of an error.
    #[instrument(skip_all, fields(path = %source.path().display()))]
    pub fn compile(&self, source: &SourceFile) -> Result<Compilation, CompileError> {
        let mut compilation = Compilation::default();

        debug!("Lexical analysis");
        let tokens = tokenize(source).map_err(|error| CompileError::lex(error, source))?;
        if self.dump_tokens {
            compilation.tokens = Some(tokens.iter().join("\n"));
        }

        debug!("Parsing");
        let outcome = parse_translation_unit(&tokens);
        if self.dump_ast {
            compilation.ast = Some(dump(&outcome.ast, outcome.root));
        }
        if outcome.has_errors() {
            warn!(
                "{} syntax error(s), skipping semantic analysis and code generation",
                outcome.errors.len()
            );
            compilation.aborted = true;
            compilation
                .diagnostics
                .extend(outcome.errors.iter().map(|error| {
                    let location = error.location().unwrap_or_else(|| source.start());
                    Diagnostic::new(location, error.to_string()).with_citation(source)
                }));
            return Ok(compilation);
        }

        debug!("Semantic analysis");
        let errors = check(&outcome.ast, outcome.root, &self.type_aliases);
        compilation.diagnostics.extend(errors.iter().map(|error| {
            Diagnostic::new(error.location(), error.to_string())
        }));

        if self.emit {
            debug!("Code generation");
            compilation.output = Some(emit(
                &outcome.ast,
                outcome.root,
                &self.type_aliases,
                self.emit_options,
            ));
        }
        Ok(compilation)
    }
}

/// Everything produced by translating one source file
#[derive(Debug, Default)]
pub struct Compilation {
    /// The whole rendered program, unless code generation was skipped
    pub output: Option<String>,
    /// Diagnostics in the order they were found
    pub diagnostics: Vec<Diagnostic>,
    /// Whether a hard parse error stopped the translation
    pub aborted: bool,
    /// Every scanned token, one per line, when requested
    pub tokens: Option<String>,
    /// The parsed syntax tree, when requested
    pub ast: Option<serde_json::Value>,
}

impl Compilation {
    /// Whether the translation finished without any diagnostic
    pub fn is_clean(&self) -> bool {
        !self.aborted && self.diagnostics.is_empty()
    }
}

/// Builder for creating a [Compiler] instance.
#[derive(Debug)]
pub struct CompilerBuilder {
    pub type_aliases: TypeAliasTable,
    pub translate_type_aliases: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
    /// Whether to run code generation at all
    pub emit: bool,
}

impl CompilerBuilder {
    /// Creates a CompilerBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds aliases on top of the current ones, replacing those that already exist
    pub fn type_aliases<I: IntoIterator<Item = TypeAlias>>(mut self, aliases: I) -> Self {
        self.type_aliases.extend(aliases);
        self
    }

    /// Replaces the whole alias table
    pub fn type_alias_table(mut self, table: TypeAliasTable) -> Self {
        self.type_aliases = table;
        self
    }

    pub fn translate_type_aliases(mut self, translate: bool) -> Self {
        self.translate_type_aliases = translate;
        self
    }

    pub fn dump_tokens(mut self, dump: bool) -> Self {
        self.dump_tokens = dump;
        self
    }

    pub fn dump_ast(mut self, dump: bool) -> Self {
        self.dump_ast = dump;
        self
    }

    pub fn emit(mut self, emit: bool) -> Self {
        self.emit = emit;
        self
    }

    /// Builds a [Compiler] instance from this builder
    pub fn build(self) -> Compiler {
        Compiler {
            type_aliases: self.type_aliases,
            emit_options: EmitOptions {
                translate_type_aliases: self.translate_type_aliases,
            },
            dump_tokens: self.dump_tokens,
            dump_ast: self.dump_ast,
            emit: self.emit,
        }
    }
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self {
            type_aliases: TypeAliasTable::default(),
            translate_type_aliases: false,
            dump_tokens: false,
            dump_ast: false,
            emit: true,
        }
    }
}

/// An error that stops a translation before it produces anything
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("could not read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// The lexing error, already rendered against its source
    #[error("{0}")]
    Lex(Diagnostic),
}

impl CompileError {
    fn lex(error: LexingError<'_>, source: &SourceFile) -> Self {
        Self::Lex(Diagnostic::new(error.location(), error.to_string()).with_citation(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn compile_in_memory() {
        let source = SourceFile::new("main.cx", "i32 main() { return 0; }");
        let compilation = Compiler::builder().build().compile(&source).unwrap();
        assert!(compilation.is_clean());
        assert_eq!(
            compilation.output.as_deref(),
            Some("i32 main()\n{\n\treturn 0;\n}\n\n")
        );
        assert!(compilation.tokens.is_none());
        assert!(compilation.ast.is_none());
    }

    #[test]
    fn dumps_are_opt_in() {
        let source = SourceFile::new("main.cx", "i32 main() { }");
        let compilation = Compiler::builder()
            .dump_tokens(true)
            .dump_ast(true)
            .emit(false)
            .build()
            .compile(&source)
            .unwrap();
        assert!(compilation.output.is_none());
        let tokens = compilation.tokens.unwrap();
        assert_eq!(tokens.lines().count(), 7);
        assert!(tokens.starts_with("main.cx:1:1: NAME 'i32'"));
        assert!(tokens.ends_with("main.cx:1:15: EOF"));
        assert_eq!(
            compilation.ast.unwrap()["root"]["children"][0]["function"]["body"],
            json!({ "compound": [] })
        );
    }

    #[test]
    fn custom_aliases_extend_the_seed() {
        let source = SourceFile::new("main.cx", "usize main() { return 0; }");
        let compilation = Compiler::builder()
            .type_aliases(["usize=unsigned long".parse::<TypeAlias>().unwrap()])
            .translate_type_aliases(true)
            .build()
            .compile(&source)
            .unwrap();
        assert!(compilation.is_clean(), "{:?}", compilation.diagnostics);
        assert!(compilation
            .output
            .unwrap()
            .starts_with("unsigned long main()"));
    }

    #[test]
    fn lex_errors_are_fatal() {
        let source = SourceFile::new("main.cx", "i32 main() { return $; }");
        let error = Compiler::builder().build().compile(&source).unwrap_err();
        let CompileError::Lex(diagnostic) = &error else {
            panic!("expected a lexing error, got {error:?}");
        };
        assert_eq!(diagnostic.column(), 20);
        assert!(error
            .to_string()
            .starts_with("main.cx:1:21: error: unknown token starts with '$' = 0x24 = 36"));
    }
}
