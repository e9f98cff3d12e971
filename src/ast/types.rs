//! The nominal type lattice.
//!
//! `Any` sits above `Comparable`, which sits above the four ordered
//! scalar types. `Boolean` and `Nil` hang off `Any` directly.
//!
//! Every place a value of one type flows into a slot of another (declarations,
//! assignments, call arguments, returns, operands) goes through
//! [`Type::require_assignable`].

use std::fmt::Display;

use crate::errors::errors::ErrorImpl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Any,
    Comparable,
    Integer,
    Decimal,
    Character,
    String,
    Boolean,
    Nil,
}

impl Type {
    pub const ALL: [Type; 8] = [
        Type::Any,
        Type::Comparable,
        Type::Integer,
        Type::Decimal,
        Type::Character,
        Type::String,
        Type::Boolean,
        Type::Nil,
    ];

    /// Resolves a type name as written in source.
    pub fn from_name(name: &str) -> Result<Type, ErrorImpl> {
        Type::ALL
            .into_iter()
            .find(|ty| ty.name() == name)
            .ok_or_else(|| ErrorImpl::UnknownType { type_: name.to_string() })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::Comparable => "Comparable",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::Boolean => "Boolean",
            Type::Nil => "Nil",
        }
    }

    /// Members of `Comparable`.
    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Decimal | Type::Character | Type::String
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Decimal)
    }

    /// Whether a value of type `source` may be stored in a slot of this type.
    pub fn is_assignable_from(&self, source: Type) -> bool {
        match self {
            Type::Any => true,
            Type::Comparable => source == Type::Comparable || source.is_comparable(),
            _ => *self == source,
        }
    }

    pub fn require_assignable(&self, source: Type) -> Result<(), ErrorImpl> {
        if self.is_assignable_from(source) {
            Ok(())
        } else {
            Err(ErrorImpl::TypeMatchError {
                expected: self.name().to_string(),
                received: source.name().to_string(),
            })
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
