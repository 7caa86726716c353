//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry point.
//! The parser pulls tokens from the lexer on demand through a two-token
//! window (current and peek) and dispatches through lookup tables:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//!
//! Lexical errors abort parsing. Syntax errors are recorded and parsing
//! resumes at the next statement boundary.

use std::{collections::HashMap, fmt::Display, mem};

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorImpl, Stage},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The last syntax failure seen while parsing a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseError {
    #[default]
    Ok,
    UnexpectedEOF,
    FailedToFindToken,
    ExpectedTypeToken,
    ExpectedIdentifier,
    UnexpectedToken,
    ExpectedExpr,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outcome of [`parse_program`]: the program block plus every syntax
/// diagnostic recorded along the way.
#[derive(Debug)]
pub struct ParseResult {
    pub ast: BlockStmt,
    pub error: ParseError,
    pub diagnostics: Vec<Error>,
    /// Every token the lexer produced, comments included, ending in `EOF`.
    pub tokens: Vec<Token>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix/postfix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    error: ParseError,
    diagnostics: Vec<Error>,
    tokens: Vec<Token>,
}

/// Pulls the next token that is not a comment, logging everything pulled
/// into `seen`. The lexer repeats `EOF` once exhausted; it is logged once.
fn next_significant(lexer: &mut Lexer, seen: &mut Vec<Token>) -> Result<Token, Error> {
    loop {
        let token = lexer.next_token()?;
        let repeated_eof = token.kind == TokenKind::EOF
            && seen.last().is_some_and(|last| last.kind == TokenKind::EOF);
        if !repeated_eof {
            seen.push(token.clone());
        }
        if token.kind != TokenKind::Comment {
            return Ok(token);
        }
    }
}

impl Parser {
    /// Creates a parser and primes its lookahead window.
    ///
    /// Fails only if the first two tokens cannot be lexed.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let mut tokens = vec![];
        let current = next_significant(&mut lexer, &mut tokens)?;
        let peek = next_significant(&mut lexer, &mut tokens)?;

        let mut parser = Parser {
            lexer,
            current,
            peek,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            error: ParseError::Ok,
            diagnostics: vec![],
            tokens,
        };
        create_token_lookups(&mut parser);

        Ok(parser)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn get_position(&self) -> Position {
        self.current.position
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = next_significant(&mut self.lexer, &mut self.tokens)?;
        let promoted = mem::replace(&mut self.peek, next);
        Ok(mem::replace(&mut self.current, promoted))
    }

    /// Consumes the current token if it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// A mismatch is recorded as a diagnostic and parsing carries on as if
    /// the token had been present. Only lexical errors are returned.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<(), Error> {
        if self.matches(expected_kind)? {
            return Ok(());
        }

        let error = Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from(expected),
                found: self.current.lexeme.clone(),
            },
            self.current.position,
        );
        self.record(error);
        Ok(())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Stores a syntax diagnostic and updates the last error code.
    pub fn record(&mut self, error: Error) {
        let at_eof = self.current.kind == TokenKind::EOF;
        self.error = match error.get_kind() {
            _ if at_eof => ParseError::UnexpectedEOF,
            ErrorImpl::ExpectedToken { .. } => ParseError::FailedToFindToken,
            ErrorImpl::ExpectedExpression { .. } => ParseError::ExpectedExpr,
            ErrorImpl::ExpectedType { .. } => ParseError::ExpectedTypeToken,
            ErrorImpl::ExpectedIdentifier { .. } => ParseError::ExpectedIdentifier,
            _ => ParseError::UnexpectedToken,
        };
        tracing::trace!(code = %self.error, "syntax error: {}", error);
        self.diagnostics.push(error);
    }

    /// Splits a failed parse into its recoverable and fatal halves.
    ///
    /// Syntax errors are recorded and yield `Ok(())`; anything else is
    /// handed back to abort the parse.
    pub fn absorb(&mut self, error: Error) -> Result<(), Error> {
        if error.get_stage() == Stage::Syntax {
            self.record(error);
            Ok(())
        } else {
            Err(error)
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` when it binds nothing.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current.kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a whole program into its root block.
///
/// A statement that fails with a syntax error is dropped and the parser
/// skips to just past the next `;` (or to the end of input) before resuming.
/// A variable declaration with a broken initializer is kept without it.
pub fn parse_program(lexer: Lexer) -> Result<ParseResult, Error> {
    let mut parser = Parser::new(lexer)?;
    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                parser.absorb(error)?;
                while !matches!(
                    parser.current_token_kind(),
                    TokenKind::Semicolon | TokenKind::EOF
                ) {
                    parser.advance()?;
                }
                parser.matches(TokenKind::Semicolon)?;
            }
        }
    }

    let ast = BlockStmt {
        body,
        position: Position::new(1, 1),
    };
    tracing::debug!(
        declarations = ast.len(),
        diagnostics = parser.diagnostics.len(),
        "parsed program"
    );

    Ok(ParseResult {
        ast,
        error: parser.error,
        diagnostics: parser.diagnostics,
        tokens: parser.tokens,
    })
}

/// Lexes and parses `source` in one step.
pub fn parse(source: &str) -> Result<ParseResult, Error> {
    parse_program(Lexer::new(source))
}
