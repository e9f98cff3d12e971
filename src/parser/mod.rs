//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`Source`](crate::ast::ast::Source). It uses binding powers for
//! expressions and keyword-keyed handlers for statements:
//!
//! - Source structure (globals first, then at least one function)
//! - Statement parsing (declarations, assignments, control flow, return)
//! - Expression parsing with four left-associative precedence levels
//! - Literal escape resolution
//!
//! Expression parsing uses NUD (null denotation) handlers keyed by token
//! kind and LED (left denotation) handlers keyed by operator text.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
