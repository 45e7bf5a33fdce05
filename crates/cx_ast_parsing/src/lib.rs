//! Scanning and parsing of cx source files into a syntax tree

pub mod lexer;
pub mod parser;
