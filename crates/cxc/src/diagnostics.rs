//! Diagnostics reported to the user, detached from the source they were found in

use cx_tokens::{Location, SourceFile};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// A located error message, optionally citing the source line it refers to.
///
/// Prints as `path:line:col: error: message`, followed by the cited line and a marker under
/// the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    file: PathBuf,
    line: usize,
    column: usize,
    message: String,
    citation: Option<String>,
    /// Whitespace reaching the column of the cited line, keeping its tabs
    indent: String,
}

impl Diagnostic {
    pub fn new(location: Location<'_>, message: impl Into<String>) -> Self {
        Self {
            file: location.file().to_path_buf(),
            line: location.line(),
            column: location.column(),
            message: message.into(),
            citation: None,
            indent: String::new(),
        }
    }

    /// Cites the line of `source` this diagnostic is on
    pub fn with_citation(mut self, source: &SourceFile) -> Self {
        if let Some(line) = source.line(self.line) {
            let before = line.get(..self.column).unwrap_or(line);
            self.indent = String::from_utf8_lossy(before)
                .chars()
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            self.citation = Some(String::from_utf8_lossy(line).into_owned());
        }
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The zero-based line
    pub fn line(&self) -> usize {
        self.line
    }

    /// The zero-based column
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn citation(&self) -> Option<&str> {
        self.citation.as_deref()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: error: {}",
            self.file.display(),
            self.line + 1,
            self.column + 1,
            self.message
        )?;
        if let Some(citation) = &self.citation {
            let line = (self.line + 1).to_string();
            let width = line.len();
            writeln!(f)?;
            writeln!(f, "{line} | {citation}")?;
            write!(f, "{:width$} | {}^", "", self.indent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn display_without_citation() {
        let diagnostic = Diagnostic::new(
            Location::new(Path::new("main.cx"), 0, 0),
            "unknown data type: foo",
        );
        assert_eq!(
            diagnostic.to_string(),
            "main.cx:1:1: error: unknown data type: foo"
        );
    }

    #[test]
    fn display_with_citation() {
        let source = SourceFile::new("main.cx", "i32 main()\n{ return ; }\n");
        let diagnostic = Diagnostic::new(
            Location::new(source.path(), 1, 9),
            "expected NUMBER but got SEMICOLON",
        )
        .with_citation(&source);
        assert_eq!(diagnostic.citation(), Some("{ return ; }"));
        assert_eq!(
            diagnostic.to_string(),
            "main.cx:2:10: error: expected NUMBER but got SEMICOLON\n\
             2 | { return ; }\n  \
             |          ^"
        );
    }

    #[test]
    fn marker_follows_tabs() {
        let source = SourceFile::new("main.cx", "i32 main() {\n\t\treturn ;\n}\n");
        let diagnostic = Diagnostic::new(
            Location::new(source.path(), 1, 9),
            "expected NUMBER but got SEMICOLON",
        )
        .with_citation(&source);
        assert_eq!(
            diagnostic.to_string(),
            "main.cx:2:10: error: expected NUMBER but got SEMICOLON\n\
             2 | \t\treturn ;\n  \
             | \t\t       ^"
        );
    }

    #[test]
    fn citation_of_bytes_outside_utf8() {
        let source = SourceFile::new("main.cx", &b"\xe9 @"[..]);
        let diagnostic = Diagnostic::new(Location::new(source.path(), 0, 2), "unknown token")
            .with_citation(&source);
        assert_eq!(diagnostic.citation(), Some("\u{FFFD} @"));
        assert!(diagnostic.to_string().ends_with("1 | \u{FFFD} @\n  |   ^"));
    }
}
