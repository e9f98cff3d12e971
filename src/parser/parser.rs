//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the entry points.
//! The parser keeps lookup tables for:
//! - Statement handlers, keyed by leading keyword
//! - NUD (null denotation) handlers for operands, keyed by token kind
//! - LED (left denotation) handlers for infix operators, keyed by operator text
//! - Binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::{ast::{NodeId, Source}, expressions::Expr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, Token, TokenKind},
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::{parse_function, parse_global},
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for
/// statements and expressions. It tracks the current position in the
/// token stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (operand) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Counter for generating node ids
    current_id: u32,
}

impl Parser {
    /// Creates a new Parser over `tokens` with empty lookup tables.
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self, expected: &str) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(self.error_here(expected)),
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    pub fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.current_token().is_some_and(|token| token.is_keyword(keyword))
    }

    pub fn peek_operator(&self, operator: &str) -> bool {
        self.current_token().is_some_and(|token| token.is_operator(operator))
    }

    /// Consumes the current token if it is `operator`.
    pub fn match_operator(&mut self, operator: &str) -> bool {
        if self.peek_operator(operator) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword, expected: &str) -> Result<Token, Error> {
        if self.peek_keyword(keyword) {
            self.advance(expected)
        } else {
            Err(self.error_here(expected))
        }
    }

    pub fn expect_operator(&mut self, operator: &str) -> Result<Token, Error> {
        if self.peek_operator(operator) {
            self.advance(operator)
        } else {
            Err(self.error_here(&format!("`{}`", operator)))
        }
    }

    /// Expects an identifier that is not a reserved word and returns its text.
    pub fn expect_identifier(&mut self, expected: &str) -> Result<String, Error> {
        let is_name = self
            .current_token()
            .is_some_and(|token| token.kind == TokenKind::Identifier && token.keyword().is_none());

        if is_name {
            Ok(self.advance(expected)?.value)
        } else {
            Err(self.error_here(expected))
        }
    }

    /// Offset one past the end of the last token.
    pub fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, |token| token.end())
    }

    /// Builds an error pointing at the current token, or one past the end
    /// of input when the stream is exhausted.
    pub fn error_here(&self, expected: &str) -> Error {
        match self.current_token() {
            Some(token) => Error::parse(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                    expected: expected.to_string(),
                },
                token.offset,
            ),
            None => Error::parse(
                ErrorImpl::UnexpectedEnd { expected: expected.to_string() },
                self.end_offset(),
            ),
        }
    }

    /// Builds an error with a specific reason at the current position.
    pub fn error_at_current(&self, error_impl: ErrorImpl) -> Error {
        let offset = self.current_token().map_or(self.end_offset(), |token| token.offset);
        Error::parse(error_impl, offset)
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

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for an operator.
    pub fn led(&mut self, operator: &'static str, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(operator, binding_power);
        self.led_lookup.insert(operator, led_fn);
    }

    /// Registers a null denotation (operand) handler for a token kind.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading keyword.
    pub fn stmt(&mut self, keyword: Keyword, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }
}

fn new_parser(tokens: Vec<Token>) -> Parser {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);
    parser
}

/// Parses a stream of tokens into a [`Source`].
///
/// All globals must come before all functions, and at least one
/// function is required.
pub fn parse(tokens: Vec<Token>) -> Result<Source, Error> {
    let mut parser = new_parser(tokens);

    let mut globals = vec![];
    while parser.peek_keyword(Keyword::List)
        || parser.peek_keyword(Keyword::Var)
        || parser.peek_keyword(Keyword::Val)
    {
        globals.push(parse_global(&mut parser)?);
    }

    let mut functions = vec![];
    while parser.peek_keyword(Keyword::Fun) {
        functions.push(parse_function(&mut parser)?);
    }

    if functions.is_empty() {
        return Err(parser.error_here("a global or FUN"));
    }
    if parser.has_tokens() {
        return Err(parser.error_here("FUN"));
    }

    Ok(Source { globals, functions })
}

/// Parses a standalone expression that must span every token.
pub fn parse_expression(tokens: Vec<Token>) -> Result<Expr, Error> {
    let mut parser = new_parser(tokens);
    let expr = parse_expr(&mut parser, BindingPower::Default)?;

    if parser.has_tokens() {
        return Err(parser.error_here("end of expression"));
    }

    Ok(expr)
}
