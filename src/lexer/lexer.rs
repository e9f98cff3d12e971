use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\A[ \t\n\r\x08\\]+").unwrap();
    static ref NUMBER_START: Regex = Regex::new(r"\A-?[0-9]").unwrap();
    static ref NUMBER: Regex = Regex::new(r"\A-?[0-9]+(\.[0-9]+)?").unwrap();
    static ref CHARACTER_START: Regex = Regex::new(r"\A'").unwrap();
    static ref IDENTIFIER_START: Regex = Regex::new(r"\A[A-Za-z@]").unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"\A[A-Za-z@][A-Za-z0-9_-]*").unwrap();
    static ref STRING_START: Regex = Regex::new("\\A\"").unwrap();
    static ref OPERATOR: Regex = Regex::new(r"\A(&&|\|\||==|!=|(?s:.))").unwrap();
}

pub type LexHandler = fn(&mut Lexer) -> Result<(), Error>;

/// Pairs a one-character lookahead test with the handler that lexes
/// the token it introduces.
#[derive(Clone, Copy)]
pub struct RegexPattern {
    start: &'static Regex,
    handler: LexHandler,
}

pub struct Lexer<'a> {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { start: &WHITESPACE, handler: skip_handler },
                RegexPattern { start: &NUMBER_START, handler: number_handler },
                RegexPattern { start: &CHARACTER_START, handler: character_handler },
                RegexPattern { start: &IDENTIFIER_START, handler: identifier_handler },
                RegexPattern { start: &STRING_START, handler: string_handler },
                RegexPattern { start: &OPERATOR, handler: operator_handler },
            ],
            source,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn text_from(&self, start: usize) -> String {
        self.source[start..self.pos].to_string()
    }

    /// Consumes one escape sequence starting at a backslash.
    fn escape(&mut self) -> Result<(), Error> {
        self.advance_n(1);
        match self.peek() {
            Some(escape @ ('b' | 'n' | 'r' | 't' | '\'' | '"' | '\\')) => {
                self.advance_n(escape.len_utf8());
                Ok(())
            }
            Some(other) => Err(Error::lex(
                ErrorImpl::InvalidEscape { escape: other.to_string() },
                self.pos,
            )),
            None => Err(Error::lex(ErrorImpl::UnterminatedLiteral, self.source.len())),
        }
    }
}

fn skip_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let length = WHITESPACE.find(lexer.remainder()).map_or(1, |found| found.end());
    lexer.advance_n(length);
    Ok(())
}

fn number_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.pos;
    let matched = NUMBER
        .find(lexer.remainder())
        .map(|found| found.as_str())
        .unwrap_or_default();

    let unsigned = matched.strip_prefix('-').unwrap_or(matched);
    let sign_length = matched.len() - unsigned.len();
    let is_decimal = unsigned.contains('.');
    let integer_digits = unsigned.split('.').next().unwrap_or_default();

    if integer_digits.len() > 1 && integer_digits.starts_with('0') {
        return Err(Error::lex(
            ErrorImpl::InvalidNumber { literal: matched.to_string() },
            start + sign_length + 1,
        ));
    }

    let end = start + matched.len();
    if !is_decimal && lexer.source[end..].starts_with('.') {
        return Err(Error::lex(
            ErrorImpl::InvalidNumber { literal: format!("{}.", matched) },
            end + 1,
        ));
    }

    if matched == "-0" {
        return Err(Error::lex(
            ErrorImpl::InvalidNumber { literal: matched.to_string() },
            start,
        ));
    }

    let kind = if is_decimal { TokenKind::Decimal } else { TokenKind::Integer };
    lexer.push(MK_TOKEN!(kind, matched.to_string(), start));
    lexer.advance_n(matched.len());
    Ok(())
}

fn character_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.pos;
    lexer.advance_n(1);

    match lexer.peek() {
        None => return Err(Error::lex(ErrorImpl::UnterminatedLiteral, lexer.source.len())),
        Some('\\') => lexer.escape()?,
        Some('\'' | '\n' | '\r') => {
            return Err(Error::lex(ErrorImpl::InvalidCharacterLiteral, lexer.pos))
        }
        Some(payload) => lexer.advance_n(payload.len_utf8()),
    }

    match lexer.peek() {
        None => Err(Error::lex(ErrorImpl::UnterminatedLiteral, lexer.source.len())),
        Some('\'') => {
            lexer.advance_n(1);
            let value = lexer.text_from(start);
            lexer.push(MK_TOKEN!(TokenKind::Character, value, start));
            Ok(())
        }
        Some(_) => Err(Error::lex(ErrorImpl::InvalidCharacterLiteral, lexer.pos)),
    }
}

fn string_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.pos;
    lexer.advance_n(1);

    loop {
        match lexer.peek() {
            None => return Err(Error::lex(ErrorImpl::UnterminatedLiteral, lexer.source.len())),
            Some('"') => {
                lexer.advance_n(1);
                break;
            }
            Some('\n' | '\r') => return Err(Error::lex(ErrorImpl::UnterminatedLiteral, lexer.pos)),
            Some('\\') => lexer.escape()?,
            Some(ch) => lexer.advance_n(ch.len_utf8()),
        }
    }

    let value = lexer.text_from(start);
    lexer.push(MK_TOKEN!(TokenKind::String, value, start));
    Ok(())
}

fn identifier_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let value = IDENTIFIER
        .find(lexer.remainder())
        .map(|found| found.as_str().to_string())
        .unwrap_or_default();

    let length = value.len();
    lexer.push(MK_TOKEN!(TokenKind::Identifier, value, lexer.pos));
    lexer.advance_n(length);
    Ok(())
}

fn operator_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let value = OPERATOR
        .find(lexer.remainder())
        .map(|found| found.as_str().to_string())
        .unwrap_or_default();

    let length = value.len().max(1);
    lexer.push(MK_TOKEN!(TokenKind::Operator, value, lexer.pos));
    lexer.advance_n(length);
    Ok(())
}

/// Splits source text into tokens, skipping whitespace.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let handler = lex
            .patterns
            .iter()
            .find(|pattern| pattern.start.is_match(remainder))
            .map(|pattern| pattern.handler)
            .unwrap_or(operator_handler);

        handler(&mut lex)?;
    }

    Ok(lex.tokens)
}
