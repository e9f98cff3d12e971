//! Main interpreter module.
//!
//! This module contains the core Interpreter structure, the runtime records
//! stored in scope, and the entry point that runs a checked program. The
//! statement and expression walkers live in `stmt` and `expr`.

use std::{cmp::Ordering, fmt::Debug, rc::Rc, time::Instant};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::{
    ast::{
        ast::{Function, Global, Source},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope::Scopes,
    DecimalDivision, Options,
};

use super::{expr::evaluate_expression, stmt::execute_block, value::Value};

/// A host function. It receives its arguments already evaluated.
pub type NativeFunction = Rc<dyn Fn(&[Value]) -> Value>;

/// A variable's slot at runtime.
#[derive(Debug, Clone)]
pub struct RuntimeVariable {
    pub value: Value,
    /// Declared type; the element type for lists
    pub ty: Type,
    pub mutable: bool,
    pub is_list: bool,
}

impl RuntimeVariable {
    pub fn new(value: Value, ty: Type, mutable: bool) -> Self {
        RuntimeVariable {
            value,
            ty,
            mutable,
            is_list: false,
        }
    }

    /// The type a value stored through this variable must have. A bare
    /// list slot holds any list, an element of it holds the element type.
    pub fn slot_type(&self, indexed: bool) -> Type {
        match (self.is_list, indexed) {
            (true, true) | (false, false) => self.ty,
            _ => Type::Any,
        }
    }
}

#[derive(Clone)]
pub enum RuntimeFunction<'a> {
    User(&'a Function),
    Native(NativeFunction),
}

impl Debug for RuntimeFunction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeFunction::User(function) => write!(f, "User({})", function.name),
            RuntimeFunction::Native(_) => write!(f, "Native"),
        }
    }
}

pub type RuntimeScopes<'a> = Scopes<RuntimeVariable, RuntimeFunction<'a>>;

/// What a statement asks its enclosing block to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    /// Unwind to the nearest call boundary with this value
    Return(Value),
}

/// The tree-walking interpreter state.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the source tree whose functions are being run
pub struct Interpreter<'a> {
    /// Every live environment, global frame first
    pub scopes: RuntimeScopes<'a>,
    /// Numeric policies chosen by the host
    pub options: Options,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter over scopes the host has already seeded
    /// with its native functions.
    pub fn new(scopes: RuntimeScopes<'a>, options: Options) -> Self {
        Interpreter { scopes, options }
    }

    /// Calls the function registered as `(name, arguments.len())`.
    ///
    /// User functions run in a fresh frame whose parent is the global
    /// frame. A body that finishes without `RETURN` yields `NIL`.
    pub fn call_function(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, Error> {
        let function = self
            .scopes
            .get_function(name, arguments.len())
            .cloned()
            .ok_or_else(|| {
                Error::runtime(ErrorImpl::FunctionNotDeclared {
                    function: name.to_string(),
                    arity: arguments.len(),
                })
            })?;

        let function = match function {
            RuntimeFunction::Native(native) => return Ok(native(&arguments)),
            RuntimeFunction::User(function) => function,
        };

        tracing::trace!(function = %function.name, arity = arguments.len(), "call");

        let mark = self.scopes.enter_function();
        let result = self.execute_function(function, arguments);
        self.scopes.exit(mark);

        match result? {
            Flow::Return(value) => {
                let return_type = match &function.return_type_name {
                    Some(name) => Type::from_name(name).map_err(Error::runtime)?,
                    None => Type::Nil,
                };
                require_value(return_type, &value)?;
                Ok(value)
            }
            Flow::Continue => Ok(Value::Nil),
        }
    }

    fn execute_function(&mut self, function: &'a Function, arguments: Vec<Value>) -> Result<Flow, Error> {
        let parameters = function
            .parameter_names
            .iter()
            .zip(&function.parameter_type_names)
            .zip(arguments);

        for ((name, type_name), value) in parameters {
            let ty = Type::from_name(type_name).map_err(Error::runtime)?;
            require_value(ty, &value)?;
            self.scopes
                .declare_variable(name, RuntimeVariable::new(value, ty, true))
                .map_err(Error::runtime)?;
        }

        execute_block(self, &function.body)
    }

    /// Divides two decimals under the configured policy. `divisor` is
    /// never zero here.
    pub fn divide_decimal(&self, dividend: &BigDecimal, divisor: &BigDecimal) -> BigDecimal {
        match self.options.decimal_division {
            DecimalDivision::Unscaled => dividend / divisor,
            DecimalDivision::Scaled(digits) => scaled_quotient(dividend, divisor, digits),
        }
    }
}

/// `dividend / divisor` rounded half-to-even to exactly `digits`
/// fractional digits. Works on the decimal digits themselves, so ties are
/// decided on the decimal value.
pub fn scaled_quotient(dividend: &BigDecimal, divisor: &BigDecimal, digits: u32) -> BigDecimal {
    let (mut numerator, dividend_scale) = dividend.as_bigint_and_exponent();
    let (mut denominator, divisor_scale) = divisor.as_bigint_and_exponent();

    // dividend / divisor * 10^digits, with both scales folded into integers
    let shift = divisor_scale - dividend_scale + i64::from(digits);
    let power = num_traits::pow(BigInt::from(10), shift.unsigned_abs() as usize);
    if shift >= 0 {
        numerator *= power;
    } else {
        denominator *= power;
    }

    if denominator.is_negative() {
        numerator = -numerator;
        denominator = -denominator;
    }

    // Truncating division, then round the remainder half-to-even
    let mut quotient = &numerator / &denominator;
    let twice_remainder: BigInt = (&numerator - &quotient * &denominator).abs() * 2;
    let round_away = match twice_remainder.cmp(&denominator) {
        Ordering::Greater => true,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
        Ordering::Less => false,
    };
    if round_away {
        quotient += numerator.signum();
    }

    BigDecimal::new(quotient, i64::from(digits))
}

/// Re-checks that a value may live in a slot of type `ty`.
pub fn require_value(ty: Type, value: &Value) -> Result<(), Error> {
    ty.require_assignable(value.get_type()).map_err(Error::runtime)
}

fn execute_global(interpreter: &mut Interpreter, global: &Global) -> Result<(), Error> {
    let ty = Type::from_name(&global.type_name).map_err(Error::runtime)?;

    let value = match &global.initializer {
        Some(initializer) => evaluate_expression(interpreter, initializer)?,
        None => Value::Nil,
    };

    match &value {
        Value::List(elements) if global.is_list() => {
            for element in elements.borrow().iter() {
                require_value(ty, element)?;
            }
        }
        _ if global.initializer.is_some() => require_value(ty, &value)?,
        _ => {}
    }

    interpreter
        .scopes
        .declare_variable(
            &global.name,
            RuntimeVariable {
                value,
                ty,
                mutable: global.mutable,
                is_list: global.is_list(),
            },
        )
        .map_err(Error::runtime)
}

/// Runs a program: globals in order, then function registration, then
/// `main()`. Returns whatever `main` returns.
pub fn run<'a>(source: &'a Source, scopes: RuntimeScopes<'a>, options: Options) -> Result<Value, Error> {
    let started = Instant::now();
    let mut interpreter = Interpreter::new(scopes, options);

    for global in &source.globals {
        execute_global(&mut interpreter, global)?;
    }

    for function in &source.functions {
        interpreter
            .scopes
            .declare_function(&function.name, function.arity(), RuntimeFunction::User(function))
            .map_err(Error::runtime)?;
    }

    let value = interpreter.call_function("main", vec![])?;
    tracing::debug!(elapsed = ?started.elapsed(), %value, "evaluated");
    Ok(value)
}
