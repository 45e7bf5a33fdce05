//! The table of type aliases that cx source may use

use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Maps the alias names usable as types to the c keywords they stand for.
///
/// Iterates in the order aliases were first inserted. Re-inserting an alias replaces its
/// keyword but keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasTable {
    aliases: IndexMap<Cow<'static, str>, Cow<'static, str>>,
}

impl TypeAliasTable {
    /// A table with no aliases at all
    pub fn empty() -> Self {
        Self {
            aliases: IndexMap::new(),
        }
    }

    /// Adds an alias, returning the keyword it previously stood for
    pub fn insert(
        &mut self,
        alias: impl Into<Cow<'static, str>>,
        keyword: impl Into<Cow<'static, str>>,
    ) -> Option<Cow<'static, str>> {
        self.aliases.insert(alias.into(), keyword.into())
    }

    /// The keyword an alias stands for
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(|keyword| keyword.as_ref())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, keyword)| (alias.as_ref(), keyword.as_ref()))
    }
}

impl Default for TypeAliasTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (alias, keyword) in [
            ("b8", "_Bool"),
            ("i8", "signed char"),
            ("i16", "signed short"),
            ("i32", "signed int"),
            ("i64", "signed long long"),
            ("u8", "unsigned char"),
            ("u16", "unsigned short"),
            ("u32", "unsigned int"),
            ("u64", "unsigned long long"),
            ("f32", "float"),
            ("f64", "double"),
        ] {
            table.insert(alias, keyword);
        }
        table
    }
}

impl Extend<TypeAlias> for TypeAliasTable {
    fn extend<T: IntoIterator<Item = TypeAlias>>(&mut self, iter: T) {
        for TypeAlias { alias, keyword } in iter {
            self.insert(alias, keyword);
        }
    }
}

/// A single `ALIAS=KEYWORD` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub alias: String,
    pub keyword: String,
}

impl Display for TypeAlias {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.alias, self.keyword)
    }
}

impl FromStr for TypeAlias {
    type Err = ParseTypeAliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (alias, keyword) = s
            .split_once('=')
            .ok_or_else(|| ParseTypeAliasError::MissingEquals(s.to_string()))?;
        let alias = alias.trim();
        let keyword = keyword.trim();
        let is_name = alias
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_name {
            return Err(ParseTypeAliasError::InvalidAlias(alias.to_string()));
        }
        if keyword.is_empty() {
            return Err(ParseTypeAliasError::EmptyKeyword(alias.to_string()));
        }
        Ok(Self {
            alias: alias.to_string(),
            keyword: keyword.to_string(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTypeAliasError {
    #[error("{0:?} should be written as ALIAS=KEYWORD")]
    MissingEquals(String),
    #[error("{0:?} is not a valid alias name")]
    InvalidAlias(String),
    #[error("alias {0:?} has no keyword")]
    EmptyKeyword(String),
}
