//! Creates the syntax tree from a token stream

use cx_ast::{Ast, Mark, NodeId};
use cx_tokens::{Located, Token, TokenKind};
use std::any::type_name;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

pub mod error;
pub mod items;
pub mod singletons;
pub mod statement;

pub use error::*;
pub use items::parse_translation_unit;

/// Parser for syntax tree items.
///
/// A production is handed an already allocated slot, which it promotes once it matches.
pub trait Parser<'t, 'p> {
    fn non_terminal(&self) -> &'static str;
    fn parse(&mut self, parser: &mut SyntacticParser<'t, 'p>, node: NodeId) -> SyntaxResult<'p>;
}

impl<'t, 'p, F> Parser<'t, 'p> for F
where
    F: FnMut(&mut SyntacticParser<'t, 'p>, NodeId) -> SyntaxResult<'p>,
{
    fn non_terminal(&self) -> &'static str {
        type_name::<F>()
    }

    fn parse(&mut self, parser: &mut SyntacticParser<'t, 'p>, node: NodeId) -> SyntaxResult<'p> {
        (self)(parser, node)
    }
}

/// Err enum used to represent recoverable and non-recoverable errors
#[derive(Debug)]
pub enum Err<E> {
    /// a recoverable error
    Error(E),
    /// a non-recoverable error
    Failure(E),
}

impl<E> Err<E> {
    pub fn cut(self) -> Self {
        match self {
            Err::Error(e) => Err::Failure(e),
            e @ Err::Failure(_) => e,
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            Err::Error(e) | Err::Failure(e) => e,
        }
    }
}

impl<E: std::error::Error> Display for Err<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Err::Error(e) => {
                write!(f, "recoverable error: {e}")
            }
            Err::Failure(e) => {
                write!(f, "unrecoverable error: {e}")
            }
        }
    }
}

impl<E: std::error::Error> std::error::Error for Err<E> {}

impl<'p> From<SyntaxError<'p>> for Err<SyntaxError<'p>> {
    fn from(value: SyntaxError<'p>) -> Self {
        Err::Error(value)
    }
}

/// Everything a parse produced
#[derive(Debug)]
pub struct ParseOutcome<'p> {
    pub ast: Ast<'p>,
    pub root: NodeId,
    /// Hard errors recorded while parsing. When not empty, the tree should not be trusted.
    pub errors: Vec<SyntaxError<'p>>,
}

impl ParseOutcome<'_> {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Copy, Clone)]
struct Snapshot {
    cursor: usize,
    mark: Mark,
    non_terminals: usize,
}

/// Creates the syntax tree from a token stream.
///
/// Holds a random access cursor over the tokens and the arena under construction. Every
/// attempted production is undone completely when it fails: the cursor is restored and the
/// nodes it allocated are released.
#[derive(Debug)]
pub struct SyntacticParser<'t, 'p> {
    tokens: &'t [Token<'p>],
    cursor: usize,
    eof: bool,
    ast: Ast<'p>,
    errors: Vec<SyntaxError<'p>>,
    non_terminals: Vec<&'static str>,
}

impl<'t, 'p> SyntacticParser<'t, 'p> {
    /// Creates a new parser over tokens ending with [TokenKind::Eof]
    pub fn new(tokens: &'t [Token<'p>]) -> Self {
        Self {
            tokens,
            cursor: 0,
            eof: false,
            ast: Ast::new(),
            errors: vec![],
            non_terminals: vec![],
        }
    }

    /// peek the current lookahead
    pub fn peek(&self) -> Option<&'t Token<'p>> {
        self.tokens.get(self.cursor)
    }

    /// Consumes the current lookahead. The cursor never moves past [TokenKind::Eof], reaching
    /// it latches the end of stream instead.
    pub fn advance(&mut self) -> Option<&'t Token<'p>> {
        let token = self.peek();
        match token {
            Some(token) if token.kind() != TokenKind::Eof => {
                trace!("consumed {token}");
                self.cursor += 1;
            }
            _ => {
                trace!("reached end of stream");
                self.eof = true;
            }
        }
        token
    }

    /// Whether no more tokens can be consumed
    pub fn at_eof(&self) -> bool {
        self.eof
            || self
                .peek()
                .map_or(true, |token| token.kind() == TokenKind::Eof)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn ast(&self) -> &Ast<'p> {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast<'p> {
        &mut self.ast
    }

    /// Hard errors recorded so far
    pub fn errors(&self) -> &[SyntaxError<'p>] {
        &self.errors
    }

    /// consumes if predicate matches
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<&'t Token<'p>>
    where
        F: FnOnce(&Token<'p>) -> bool,
    {
        let token = self.peek().filter(|token| predicate(token))?;
        self.advance();
        Some(token)
    }

    /// Consumes a token of the given kind
    pub fn expect(&mut self, kind: TokenKind) -> SyntaxResult<'p, &'t Token<'p>> {
        self.consume_if(|token| token.kind() == kind).ok_or_else(|| {
            self.error(ErrorKind::expected_token(
                [kind],
                self.peek().cloned(),
            ))
        })
    }

    /// Consumes a name with exactly the given text
    pub fn expect_keyword(&mut self, keyword: &'static str) -> SyntaxResult<'p, &'t Token<'p>> {
        self.consume_if(|token| token.is_name(keyword))
            .ok_or_else(|| self.error(ErrorKind::ExpectedKeyword(keyword, self.peek().cloned())))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
            mark: self.ast.mark(),
            non_terminals: self.non_terminals.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor = snapshot.cursor;
        self.ast.release_from(snapshot.mark);
        self.non_terminals.truncate(snapshot.non_terminals);
    }

    /// Runs a production into `node`, backtracking if an error occurs within it.
    ///
    /// On failure the cursor is restored and every node allocated by the production is
    /// released, leaving `node` itself unset.
    pub fn parse<P: Parser<'t, 'p>>(&mut self, node: NodeId, mut parser: P) -> SyntaxResult<'p> {
        self.run(node, &mut parser)
    }

    fn run(&mut self, node: NodeId, parser: &mut dyn Parser<'t, 'p>) -> SyntaxResult<'p> {
        let snapshot = self.snapshot();
        trace!(
            "starting parsing {} into {node} at token {}",
            parser.non_terminal(),
            self.cursor
        );
        self.non_terminals.push(parser.non_terminal());
        let result = parser.parse(self, node);
        match &result {
            Ok(()) => {
                self.non_terminals.pop();
                trace!("parsed {} into {node}", parser.non_terminal());
            }
            Err(e) => {
                trace!(
                    "backtracking {} to token {}: {e}",
                    parser.non_terminal(),
                    snapshot.cursor
                );
                self.restore(snapshot);
            }
        }
        result
    }

    /// Tries to parse a new child of `parent`, returning its id when it matched.
    ///
    /// Nothing is allocated when the production fails. A hard error is recorded before
    /// backtracking, and can be read back from [errors](Self::errors).
    pub fn try_parse<P: Parser<'t, 'p>>(
        &mut self,
        parent: Option<NodeId>,
        parser: P,
    ) -> Option<NodeId> {
        let mark = self.ast.mark();
        let node = self.ast.alloc(parent);
        match self.parse(node, parser) {
            Ok(()) => Some(node),
            Err(Err::Error(_)) => {
                self.ast.release_from(mark);
                None
            }
            Err(Err::Failure(e)) => {
                self.report(e);
                self.ast.release_from(mark);
                None
            }
        }
    }

    /// Tries each production in order on the same node, returning the first that matches.
    ///
    /// A hard error from any alternative is returned immediately.
    pub fn alt(
        &mut self,
        node: NodeId,
        alternatives: &mut [&mut dyn Parser<'t, 'p>],
    ) -> SyntaxResult<'p> {
        let mut last = None;
        for alternative in alternatives.iter_mut() {
            match self.run(node, &mut **alternative) {
                Err(Err::Error(e)) => last = Some(e),
                result => return result,
            }
        }
        Err(Err::Error(last.unwrap_or_else(|| {
            SyntaxError::new(
                ErrorKind::expected_token(std::iter::empty::<TokenKind>(), self.peek().cloned()),
                self.peek().map(|token| token.location()),
                self.non_terminals.clone(),
            )
        })))
    }

    fn report(&mut self, error: SyntaxError<'p>) {
        debug!(
            "syntax error at {}: {error}",
            error
                .location()
                .map_or_else(|| "unknown location".to_string(), |l| l.to_string())
        );
        self.errors.push(error);
    }

    /// Creates a recoverable error at the current lookahead
    pub fn error(&self, kind: ErrorKind<'p>) -> Err<SyntaxError<'p>> {
        let location = self
            .peek()
            .or_else(|| self.tokens.last())
            .map(|token| token.location());
        Err::Error(SyntaxError::new(kind, location, self.non_terminals.clone()))
    }

    /// Gives up the parser, keeping what was built
    pub fn finish(self, root: NodeId) -> ParseOutcome<'p> {
        ParseOutcome {
            ast: self.ast,
            root,
            errors: self.errors,
        }
    }
}
