//! Property-based tests for the type lattice and number lexing.
//!
//! These tests use proptest to generate arbitrary types and literals and
//! verify that key invariants hold across many random inputs.

use proptest::prelude::*;
use quill::{
    ast::types::Type,
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn any_type() -> impl Strategy<Value = Type> {
    proptest::sample::select(Type::ALL.to_vec())
}

proptest! {
    #[test]
    fn assignability_is_reflexive(ty in any_type()) {
        prop_assert!(ty.require_assignable(ty).is_ok());
    }

    #[test]
    fn any_accepts_everything(ty in any_type()) {
        prop_assert!(Type::Any.require_assignable(ty).is_ok());
    }

    #[test]
    fn comparable_accepts_exactly_its_members(ty in any_type()) {
        let member = matches!(
            ty,
            Type::Comparable | Type::Integer | Type::Decimal | Type::Character | Type::String
        );
        prop_assert_eq!(Type::Comparable.is_assignable_from(ty), member);
    }

    #[test]
    fn assignability_is_antisymmetric(a in any_type(), b in any_type()) {
        if a != b && a.is_assignable_from(b) {
            prop_assert!(!b.is_assignable_from(a));
        }
    }

    #[test]
    fn assignability_is_transitive(a in any_type(), b in any_type(), c in any_type()) {
        if a.is_assignable_from(b) && b.is_assignable_from(c) {
            prop_assert!(a.is_assignable_from(c));
        }
    }

    #[test]
    fn integers_lex_as_one_token(value in any::<i64>()) {
        let text = value.to_string();
        let tokens = tokenize(&text).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Integer);
        prop_assert_eq!(&tokens[0].value, &text);
        prop_assert_eq!(tokens[0].offset, 0);
    }

    #[test]
    fn decimals_lex_as_one_token(whole in 0u32..100_000, fraction in "[0-9]{1,6}") {
        let text = format!("{}.{}", whole, fraction);
        let tokens = tokenize(&text).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::Decimal);
        prop_assert_eq!(&tokens[0].value, &text);
    }

    #[test]
    fn leading_zeros_are_rejected(digits in "[0-9]{1,8}") {
        let text = format!("0{}", digits);
        let error = tokenize(&text).unwrap_err();

        prop_assert_eq!(error.get_position().map(|position| position.0), Some(1));
    }
}
