//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Identifiers and reserved words
//! - Numeric literals (integers and decimals) and their malformed shapes
//! - Character and string literals with escape sequences
//! - Operators and whitespace
//! - Error offsets

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::tokenize,
    tokens::{Keyword, TokenKind},
};

fn error_offset(source: &str) -> usize {
    tokenize(source)
        .expect_err("source should not lex")
        .get_position()
        .map(|position| position.0)
        .expect("lex errors carry a position")
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("getName @thing thelegend27 snake_case kebab-case").unwrap();

    assert_eq!(tokens.len(), 5);
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "getName");
    assert_eq!(tokens[1].value, "@thing");
    assert_eq!(tokens[2].value, "thelegend27");
    assert_eq!(tokens[3].value, "snake_case");
    assert_eq!(tokens[4].value, "kebab-case");
}

#[test]
fn test_identifier_cannot_start_with_digit_or_underscore() {
    let tokens = tokenize("1fish").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "fish");

    let tokens = tokenize("_x").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Operator);
    assert_eq!(tokens[0].value, "_");
}

#[test]
fn test_keywords_are_identifiers() {
    let tokens = tokenize("FUN main DO END").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert!(tokens[0].is_keyword(Keyword::Fun));
    assert_eq!(tokens[1].keyword(), None);
    assert!(tokens[2].is_keyword(Keyword::Do));
    assert!(tokens[3].is_keyword(Keyword::End));
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("1 0 -1 123456789 1.0 0.5 -0.5 123.456").unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Decimal,
            TokenKind::Decimal,
            TokenKind::Decimal,
            TokenKind::Decimal,
        ]
    );
    assert_eq!(tokens[2].value, "-1");
    assert_eq!(tokens[6].value, "-0.5");
}

#[test]
fn test_minus_without_digit_is_operator() {
    let tokens = tokenize("x - y").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].value, "-");
}

#[test]
fn test_leading_zero_rejected() {
    assert_eq!(error_offset("01"), 1);
    assert_eq!(error_offset("-007"), 2);
}

#[test]
fn test_trailing_decimal_point_rejected() {
    let error = tokenize("1.").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::InvalidNumber { literal: String::from("1.") }
    );
    assert_eq!(error_offset("1."), 2);
    assert_eq!(error_offset("x = 7.a"), 6);
}

#[test]
fn test_negative_zero_rejected() {
    assert_eq!(error_offset("-0"), 0);
    assert!(tokenize("-0.0").is_ok());
}

#[test]
fn test_tokenize_characters() {
    let tokens = tokenize(r"'c' '\n' '\'' '@'").unwrap();

    assert!(tokens.iter().all(|token| token.kind == TokenKind::Character));
    assert_eq!(tokens[0].value, "'c'");
    assert_eq!(tokens[1].value, r"'\n'");
    assert_eq!(tokens[2].value, r"'\''");
}

#[test]
fn test_invalid_characters() {
    assert_eq!(error_offset("''"), 1);
    assert_eq!(error_offset("'ab'"), 2);
    assert_eq!(error_offset("'a"), 2);
    assert_eq!(error_offset("'\n'"), 1);
    assert_eq!(error_offset(r"'\q'"), 2);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""" "abc" "Hello,\nWorld" "say \"hi\"""#).unwrap();

    assert!(tokens.iter().all(|token| token.kind == TokenKind::String));
    assert_eq!(tokens[0].value, "\"\"");
    assert_eq!(tokens[1].value, "\"abc\"");
    assert_eq!(tokens[2].value, r#""Hello,\nWorld""#);
    assert_eq!(tokens[3].value, r#""say \"hi\"""#);
}

#[test]
fn test_unterminated_string_reports_input_length() {
    let source = "\"unterminated";
    let error = tokenize(source).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnterminatedLiteral);
    assert_eq!(error_offset(source), source.len());
}

#[test]
fn test_string_with_raw_newline_rejected() {
    assert_eq!(error_offset("\"line\nbreak\""), 5);
}

#[test]
fn test_invalid_string_escape() {
    let error = tokenize(r#""invalid\escape""#).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::InvalidEscape { escape: String::from("e") });
    assert_eq!(error_offset(r#""invalid\escape""#), 9);
}

#[test]
fn test_tokenize_operators() {
    let tokens = tokenize("&& || == != ( ) ; = < > + - * / ^ [ ] , : $").unwrap();

    assert!(tokens.iter().all(|token| token.kind == TokenKind::Operator));
    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["&&", "||", "==", "!=", "(", ")", ";", "=", "<", ">", "+", "-", "*", "/", "^", "[", "]", ",", ":", "$"]
    );
}

#[test]
fn test_single_ampersand_and_bang_are_single_operators() {
    let tokens = tokenize("&!").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "&");
    assert_eq!(tokens[1].value, "!");
}

#[test]
fn test_tokenize_whitespace_handling() {
    let tokens = tokenize(" \t\r\n\u{8}LET x\n").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].offset, 5);
    assert_eq!(tokens[1].offset, 9);
}

#[test]
fn test_standalone_backslash_is_skipped() {
    let tokens = tokenize("a \\ b").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].value, "b");
}

#[test]
fn test_tokenize_simple_statement() {
    let tokens = tokenize("LET x = 5;").unwrap();

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Operator);
    assert_eq!(tokens[3].kind, TokenKind::Integer);
    assert_eq!(tokens[4].kind, TokenKind::Operator);
    assert_eq!(tokens[3].offset, 8);
    assert_eq!(tokens[4].end(), 10);
}

#[test]
fn test_empty_source() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   \n").unwrap().is_empty());
}
