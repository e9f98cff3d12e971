use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
    ast::{
        expressions::{AccessExpr, BinaryExpr, BinaryOperator, Expr, ExprKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    interpreter::Interpreter,
    value::{ListHandle, Value},
};

fn mismatch(expected: impl ToString, received: &Value) -> Error {
    Error::runtime(ErrorImpl::TypeMatchError {
        expected: expected.to_string(),
        received: received.get_type().name().to_string(),
    })
}

pub fn evaluate_expression(interpreter: &mut Interpreter, expression: &Expr) -> Result<Value, Error> {
    match &expression.kind {
        ExprKind::Literal(literal) => Ok(Value::from(literal)),
        ExprKind::Group(inner) => evaluate_expression(interpreter, inner),
        ExprKind::Binary(binary) => evaluate_binary(interpreter, binary),
        ExprKind::Access(access) => evaluate_access(interpreter, access),
        ExprKind::Call(call) => {
            let mut arguments = Vec::with_capacity(call.arguments.len());
            for argument in &call.arguments {
                arguments.push(evaluate_expression(interpreter, argument)?);
            }
            interpreter.call_function(&call.name, arguments)
        }
        ExprKind::ListLiteral(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expression(interpreter, element)?);
            }
            Ok(Value::list(values))
        }
    }
}

pub fn evaluate_condition(interpreter: &mut Interpreter, condition: &Expr) -> Result<bool, Error> {
    match evaluate_expression(interpreter, condition)? {
        Value::Boolean(value) => Ok(value),
        other => Err(mismatch(Type::Boolean, &other)),
    }
}

/// The list behind `value`, or `NotAList` naming the variable it came from.
pub fn list_of(name: &str, value: &Value) -> Result<ListHandle, Error> {
    match value {
        Value::List(elements) => Ok(elements.clone()),
        _ => Err(Error::runtime(ErrorImpl::NotAList {
            variable: name.to_string(),
        })),
    }
}

/// Bounds-checks an index value against a list of `length` elements.
pub fn evaluate_index(index: &Value, length: usize) -> Result<usize, Error> {
    let Value::Integer(index) = index else {
        return Err(mismatch(Type::Integer, index));
    };

    match index.to_usize() {
        Some(position) if position < length => Ok(position),
        _ => Err(Error::runtime(ErrorImpl::IndexOutOfRange {
            index: index.to_string(),
            length,
        })),
    }
}

fn evaluate_access(interpreter: &mut Interpreter, access: &AccessExpr) -> Result<Value, Error> {
    let index = match &access.index {
        Some(index) => Some(evaluate_expression(interpreter, index)?),
        None => None,
    };

    let variable = interpreter.scopes.get_variable(&access.name).ok_or_else(|| {
        Error::runtime(ErrorImpl::VariableNotDeclared {
            variable: access.name.clone(),
        })
    })?;

    let Some(index) = index else {
        return Ok(variable.value.clone());
    };

    let list = list_of(&access.name, &variable.value)?;
    let elements = list.borrow();
    let position = evaluate_index(&index, elements.len())?;
    let element = elements[position].clone();
    Ok(element)
}

fn evaluate_binary(interpreter: &mut Interpreter, binary: &BinaryExpr) -> Result<Value, Error> {
    // The right operand of && and || only runs when the left one does not decide
    match binary.operator {
        BinaryOperator::And => {
            if !evaluate_condition(interpreter, &binary.left)? {
                return Ok(Value::Boolean(false));
            }
            return Ok(Value::Boolean(evaluate_condition(interpreter, &binary.right)?));
        }
        BinaryOperator::Or => {
            if evaluate_condition(interpreter, &binary.left)? {
                return Ok(Value::Boolean(true));
            }
            return Ok(Value::Boolean(evaluate_condition(interpreter, &binary.right)?));
        }
        _ => {}
    }

    let left = evaluate_expression(interpreter, &binary.left)?;
    let right = evaluate_expression(interpreter, &binary.right)?;

    match binary.operator {
        BinaryOperator::Less => Ok(Value::Boolean(compare(&left, &right)? == Ordering::Less)),
        BinaryOperator::Greater => Ok(Value::Boolean(compare(&left, &right)? == Ordering::Greater)),
        BinaryOperator::Equal => Ok(Value::Boolean(equals(&left, &right)?)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(!equals(&left, &right)?)),
        BinaryOperator::Add => add(left, right),
        BinaryOperator::Subtract => arithmetic(left, right, |a, b| a - b, |a, b| a - b),
        BinaryOperator::Multiply => arithmetic(left, right, |a, b| a * b, |a, b| a * b),
        BinaryOperator::Divide => divide(interpreter, left, right),
        BinaryOperator::Power => match (&left, &right) {
            (Value::Integer(base), Value::Integer(exponent)) => Ok(Value::Integer(power(base, exponent))),
            (Value::Integer(_), other) | (other, _) => Err(mismatch(Type::Integer, other)),
        },
        BinaryOperator::And | BinaryOperator::Or => unreachable!("logical operators return early"),
    }
}

fn compare(left: &Value, right: &Value) -> Result<Ordering, Error> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a.cmp(b)),
        (Value::Character(a), Value::Character(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (left, right) if left.get_type() != right.get_type() => Err(mismatch(left.get_type(), right)),
        (left, _) => Err(mismatch(Type::Comparable, left)),
    }
}

fn equals(left: &Value, right: &Value) -> Result<bool, Error> {
    if left.get_type() != right.get_type() {
        return Err(mismatch(left.get_type(), right));
    }

    match left {
        Value::Boolean(_) | Value::Integer(_) | Value::Decimal(_) | Value::Character(_) | Value::String(_) => {
            Ok(left == right)
        }
        _ => Err(mismatch(Type::Comparable, left)),
    }
}

/// `+` concatenates when either side is a string.
fn add(left: Value, right: Value) -> Result<Value, Error> {
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        return Ok(Value::String(format!("{}{}", left, right)));
    }

    arithmetic(left, right, |a, b| a + b, |a, b| a + b)
}

fn arithmetic(
    left: Value,
    right: Value,
    integer: impl Fn(BigInt, BigInt) -> BigInt,
    decimal: impl Fn(BigDecimal, BigDecimal) -> BigDecimal,
) -> Result<Value, Error> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(integer(a, b))),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(decimal(a, b))),
        (left @ (Value::Integer(_) | Value::Decimal(_)), right) => Err(mismatch(left.get_type(), &right)),
        (left, _) => Err(mismatch("Integer or Decimal", &left)),
    }
}

fn divide(interpreter: &Interpreter, left: Value, right: Value) -> Result<Value, Error> {
    match (left, right) {
        (Value::Integer(_), Value::Integer(b)) if b.is_zero() => Err(Error::runtime(ErrorImpl::DivisionByZero)),
        (Value::Decimal(_), Value::Decimal(b)) if b.is_zero() => Err(Error::runtime(ErrorImpl::DivisionByZero)),
        // BigInt division truncates toward zero
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a / b)),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(Value::Decimal(interpreter.divide_decimal(&a, &b))),
        (left, right) => arithmetic(left, right, |a, _| a, |a, _| a),
    }
}

/// Integer exponentiation by squaring. A negative exponent yields 0,
/// except for a base of 1 which always yields 1.
pub fn power(base: &BigInt, exponent: &BigInt) -> BigInt {
    if exponent.is_negative() {
        return if base.is_one() { BigInt::one() } else { BigInt::zero() };
    }

    let two = BigInt::from(2);
    let mut result = BigInt::one();
    let mut base = base.clone();
    let mut exponent = exponent.clone();

    while exponent.is_positive() {
        if (&exponent % &two).is_one() {
            result *= &base;
        }
        exponent /= &two;
        if exponent.is_positive() {
            base = &base * &base;
        }
    }

    result
}
