//! The in-memory bytes of a source file

use crate::location::Location;
use std::io;
use std::path::{Path, PathBuf};

/// An immutable source file loaded completely into memory.
///
/// The contents are kept as bytes. Only the lexemes the lexer recognizes need to be ascii,
/// comments and literal bodies may hold anything. Tokens and syntax tree leaves borrow from
/// this buffer, so it must outlive both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Creates a source file from contents that are already in memory
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads the whole file at the given path
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(path, bytes))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The location of the first byte of this file
    pub fn start(&self) -> Location<'_> {
        Location::new(&self.path, 0, 0)
    }

    /// Gets the exact bytes of a zero-based line, without its line terminator.
    pub fn line(&self, line: usize) -> Option<&[u8]> {
        self.bytes
            .split(|&byte| byte == b'\n')
            .nth(line)
            .map(|src| src.strip_suffix(b"\r").unwrap_or(src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn line_lookup() {
        let source = SourceFile::new("main.cx", "i32 main()\r\n{\n\treturn 0;\n}");
        assert_eq!(source.line(0), Some(&b"i32 main()"[..]));
        assert_eq!(source.line(2), Some(&b"\treturn 0;"[..]));
        assert_eq!(source.line(3), Some(&b"}"[..]));
        assert_eq!(source.line(4), None);
    }

    #[test]
    fn read_keeps_bytes_that_are_not_utf8() {
        let mut file = tempfile::NamedTempFile::new().expect("could not create temp file");
        file.write_all(b"// caf\xe9\n").expect("could not write");
        let source = SourceFile::read(file.path()).expect("should read any bytes");
        assert_eq!(source.bytes(), b"// caf\xe9\n");
        assert_eq!(source.line(0), Some(&b"// caf\xe9"[..]));
    }

    #[test]
    fn read_missing_file() {
        let result = SourceFile::read("this/file/does/not/exist.cx");
        assert!(result.is_err());
    }
}
