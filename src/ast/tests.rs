use crate::errors::errors::ErrorImpl;

use super::{expressions::BinaryOperator, types::Type};

#[test]
fn test_assignability_is_reflexive() {
    for ty in Type::ALL {
        assert!(ty.require_assignable(ty).is_ok(), "{} from itself", ty);
    }
}

#[test]
fn test_any_accepts_everything() {
    for ty in Type::ALL {
        assert!(Type::Any.is_assignable_from(ty));
    }
}

#[test]
fn test_comparable_accepts_only_its_members() {
    assert!(Type::Comparable.is_assignable_from(Type::Integer));
    assert!(Type::Comparable.is_assignable_from(Type::Decimal));
    assert!(Type::Comparable.is_assignable_from(Type::Character));
    assert!(Type::Comparable.is_assignable_from(Type::String));
    assert!(!Type::Comparable.is_assignable_from(Type::Boolean));
    assert!(!Type::Comparable.is_assignable_from(Type::Nil));
    assert!(!Type::Comparable.is_assignable_from(Type::Any));
}

#[test]
fn test_assignability_is_not_symmetric() {
    let error = Type::Integer.require_assignable(Type::Any).unwrap_err();

    assert_eq!(
        error,
        ErrorImpl::TypeMatchError {
            expected: String::from("Integer"),
            received: String::from("Any"),
        }
    );
    assert!(Type::Integer.require_assignable(Type::Comparable).is_err());
    assert!(Type::Decimal.require_assignable(Type::Integer).is_err());
}

#[test]
fn test_type_names_round_trip() {
    for ty in Type::ALL {
        assert_eq!(Type::from_name(ty.name()), Ok(ty));
    }
    assert_eq!(
        Type::from_name("Float"),
        Err(ErrorImpl::UnknownType { type_: String::from("Float") })
    );
}

#[test]
fn test_operator_symbols() {
    for symbol in ["&&", "||", "<", ">", "==", "!=", "+", "-", "*", "/", "^"] {
        let operator = BinaryOperator::from_symbol(symbol).expect("known operator");
        assert_eq!(operator.symbol(), symbol);
    }
    assert_eq!(BinaryOperator::from_symbol("%"), None);
}
