use std::{
    cell::RefCell,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    rc::Rc,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::ast::{expressions::Literal, types::Type};

/// A shared, resizable list. Cloning the handle aliases the list.
pub type ListHandle = Rc<RefCell<Vec<Value>>>;

type ListPtr = *const RefCell<Vec<Value>>;

#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
    List(ListHandle),
}

impl Value {
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(elements)))
    }

    /// The lattice type of this value. Lists have no type of their own.
    pub fn get_type(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Boolean(_) => Type::Boolean,
            Value::Integer(_) => Type::Integer,
            Value::Decimal(_) => Type::Decimal,
            Value::Character(_) => Type::Character,
            Value::String(_) => Type::String,
            Value::List(_) => Type::Any,
        }
    }

    /// Writes the printed form, showing a list already being printed as `[...]`.
    fn write_to(&self, f: &mut Formatter<'_>, open: &mut Vec<ListPtr>) -> FmtResult {
        match self {
            Value::Nil => write!(f, "NIL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => {
                let text = value.normalized().to_plain_string();
                // Keep decimals recognisable: 2.0 rather than 2
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Value::Character(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::List(elements) => {
                let pointer = Rc::as_ptr(elements);
                if open.contains(&pointer) {
                    return write!(f, "[...]");
                }

                open.push(pointer);
                write!(f, "[")?;
                for (index, element) in elements.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    element.write_to(f, open)?;
                }
                open.pop();
                write!(f, "]")
            }
        }
    }

    /// Structural equality. A pair of lists met again while still being
    /// compared is taken as equal, so cyclic lists terminate.
    fn equals(&self, other: &Value, open: &mut Vec<(ListPtr, ListPtr)>) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Character(a), Value::Character(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
                if Rc::ptr_eq(a, b) || open.contains(&pair) {
                    return true;
                }

                let (a, b) = (a.borrow(), b.borrow());
                if a.len() != b.len() {
                    return false;
                }

                open.push(pair);
                let equal = a.iter().zip(b.iter()).all(|(a, b)| a.equals(b, open));
                open.pop();
                equal
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, &mut Vec::new())
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Boolean(value) => Value::Boolean(*value),
            Literal::Integer(value) => Value::Integer(value.clone()),
            Literal::Decimal(value) => Value::Decimal(value.clone()),
            Literal::Character(value) => Value::Character(*value),
            Literal::String(value) => Value::String(value.clone()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.write_to(f, &mut Vec::new())
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Boolean(value) => write!(f, "Boolean({})", value),
            Value::Integer(value) => write!(f, "Integer({})", value),
            Value::Decimal(_) => write!(f, "Decimal({})", self),
            Value::Character(value) => write!(f, "Character({:?})", value),
            Value::String(value) => write!(f, "String({:?})", value),
            Value::List(_) => write!(f, "List({})", self),
        }
    }
}
