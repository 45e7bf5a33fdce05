//! A trait that can provide the [Location] an item starts at

use std::fmt::{Display, Formatter};
use std::path::Path;

/// A trait that can provide the [Location] an item starts at
pub trait Located<'p> {
    fn location(&self) -> Location<'p>;
}

/// A position within a source file.
///
/// Lines and columns are zero-based, but are printed one-based as `path:line:col`.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Location<'p> {
    file: &'p Path,
    line: usize,
    column: usize,
}

impl<'p> Location<'p> {
    /// Creates a new location
    pub const fn new(file: &'p Path, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// The file this location is in
    pub fn file(&self) -> &'p Path {
        self.file
    }

    /// The zero-based line
    pub fn line(&self) -> usize {
        self.line
    }

    /// The zero-based column, in bytes from the start of the line
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for Location<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file.display(),
            self.line + 1,
            self.column + 1
        )
    }
}

impl<'p> Located<'p> for Location<'p> {
    fn location(&self) -> Location<'p> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn location_prints_one_based() {
        let location = Location::new(Path::new("main.cx"), 0, 4);
        assert_eq!(location.to_string(), "main.cx:1:5");
    }

    #[test]
    fn locations_order_by_position() {
        let path = Path::new("main.cx");
        let earlier = Location::new(path, 1, 8);
        let later = Location::new(path, 2, 0);
        assert!(earlier < later);
    }
}
