//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - One-character lookahead dispatch to a regex-backed handler per token shape
//! - Identifiers, integers, decimals, characters, strings and operators
//! - Escape validation inside character and string literals
//! - Byte offsets on every token for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
