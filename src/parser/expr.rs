use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    ast::expressions::{AccessExpr, BinaryExpr, BinaryOperator, CallExpr, Expr, ExprKind, Literal},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, TokenKind},
};

use super::{
    lookups::{BindingPower, LEDHandler},
    parser::Parser,
};

/// Parses operands and infix operators while the next operator binds
/// tighter than `bp`. Operators of equal power fold to the left.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let nud = parser
        .current_token_kind()
        .and_then(|kind| parser.get_nud_lookup().get(&kind).copied());

    let mut left = match nud {
        Some(nud) => nud(parser)?,
        None => return Err(parser.error_here("an expression")),
    };

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some((led, operator_bp)) = current_led(parser) {
        if operator_bp <= bp {
            break;
        }
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn current_led(parser: &Parser) -> Option<(LEDHandler, BindingPower)> {
    let token = parser.current_token()?;
    if token.kind != TokenKind::Operator {
        return None;
    }

    let led = parser.get_led_lookup().get(token.value.as_str())?;
    let bp = parser.get_bp_lookup().get(token.value.as_str())?;
    Some((*led, *bp))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance("an operator")?;
    let operator = BinaryOperator::from_symbol(&operator_token.value).ok_or_else(|| {
        Error::parse(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
                expected: String::from("a binary operator"),
            },
            operator_token.offset,
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }),
    ))
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance("a literal")?;
    let invalid = || {
        Error::parse(
            ErrorImpl::InvalidNumber { literal: token.value.clone() },
            token.offset,
        )
    };

    let literal = match token.kind {
        TokenKind::Integer => Literal::Integer(token.value.parse::<BigInt>().map_err(|_| invalid())?),
        TokenKind::Decimal => Literal::Decimal(token.value.parse::<BigDecimal>().map_err(|_| invalid())?),
        TokenKind::Character => {
            let unescaped = unescape(strip_quotes(&token.value));
            let mut chars = unescaped.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Literal::Character(ch),
                _ => {
                    return Err(Error::parse(
                        ErrorImpl::InvalidCharacterLiteral,
                        token.offset,
                    ))
                }
            }
        }
        TokenKind::String => Literal::String(unescape(strip_quotes(&token.value))),
        TokenKind::Identifier | TokenKind::Operator => {
            return Err(Error::parse(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                    expected: String::from("a literal"),
                },
                token.offset,
            ))
        }
    };

    Ok(Expr::new(parser.advance_id(), ExprKind::Literal(literal)))
}

/// Parses boolean and nil keywords, variable accesses, indexed accesses
/// and calls.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let literal = match parser.current_token().and_then(|token| token.keyword()) {
        Some(Keyword::True) => Some(Literal::Boolean(true)),
        Some(Keyword::False) => Some(Literal::Boolean(false)),
        Some(Keyword::Nil) => Some(Literal::Nil),
        Some(_) => return Err(parser.error_here("an expression")),
        None => None,
    };

    if let Some(literal) = literal {
        parser.advance("a literal")?;
        return Ok(Expr::new(parser.advance_id(), ExprKind::Literal(literal)));
    }

    let name = parser.expect_identifier("an identifier")?;

    if parser.match_operator("(") {
        let arguments = parse_arguments(parser)?;
        return Ok(Expr::new(
            parser.advance_id(),
            ExprKind::Call(CallExpr { name, arguments }),
        ));
    }

    let index = if parser.match_operator("[") {
        let index = parse_expr(parser, BindingPower::Default)?;
        parser.expect_operator("]")?;
        Some(Box::new(index))
    } else {
        None
    };

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Access(AccessExpr { name, index }),
    ))
}

/// Parses `expr (, expr)* )` after the opening parenthesis has been consumed.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    if parser.match_operator(")") {
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        if parser.match_operator(",") {
            if parser.peek_operator(")") {
                return Err(parser.error_at_current(ErrorImpl::TrailingComma));
            }
        } else {
            parser.expect_operator(")")?;
            return Ok(arguments);
        }
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if !parser.peek_operator("(") {
        return Err(parser.error_here("an expression"));
    }

    parser.advance("`(`")?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_operator(")")?;

    Ok(Expr::new(parser.advance_id(), ExprKind::Group(Box::new(expr))))
}

fn strip_quotes(literal: &str) -> &str {
    let inner = literal.get(1..literal.len().saturating_sub(1));
    inner.unwrap_or_default()
}

/// Resolves the escape sequences the lexer has already validated.
pub fn unescape(literal: &str) -> String {
    let mut result = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('b') => result.push('\u{8}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
