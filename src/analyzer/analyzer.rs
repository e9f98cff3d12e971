use std::str::FromStr;

use bigdecimal::BigDecimal;
use lazy_static::lazy_static;
use num_traits::ToPrimitive;

use crate::{
    ast::{
        ast::{Function, Global, Source},
        expressions::{AccessExpr, BinaryExpr, BinaryOperator, CallExpr, Expr, ExprKind, Literal},
        statements::{AssignmentStmt, DeclarationStmt, IfStmt, Stmt, SwitchStmt, WhileStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope::Scopes,
};

use super::annotations::{Annotations, FunctionBinding, VariableBinding};

lazy_static! {
    /// Largest magnitude a decimal literal may have: the largest finite double.
    static ref DECIMAL_LIMIT: BigDecimal = BigDecimal::from_str(&f64::MAX.to_string()).unwrap();
}

#[derive(Debug, Clone)]
pub struct VariableInfo {
    /// For lists, the element type.
    pub ty: Type,
    pub mutable: bool,
    pub is_list: bool,
    pub binding: VariableBinding,
}

#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub binding: FunctionBinding,
}

pub type StaticScopes = Scopes<VariableInfo, FunctionInfo>;

pub struct Analyzer {
    pub scopes: StaticScopes,
    pub annotations: Annotations,
    /// Declared return type of the function being checked
    pub return_type: Type,
}

impl Analyzer {
    pub fn new(scopes: StaticScopes) -> Self {
        Analyzer {
            scopes,
            annotations: Annotations::new(),
            return_type: Type::Nil,
        }
    }

    fn record(&mut self, expr: &Expr, ty: Type) -> Type {
        self.annotations.record_type(expr.id, ty);
        ty
    }
}

fn resolve_type(name: &str) -> Result<Type, Error> {
    Type::from_name(name).map_err(Error::analysis)
}

fn require_assignable(target: Type, source: Type) -> Result<(), Error> {
    target.require_assignable(source).map_err(Error::analysis)
}

fn mismatch(expected: impl ToString, received: Type) -> Error {
    Error::analysis(ErrorImpl::TypeMatchError {
        expected: expected.to_string(),
        received: received.name().to_string(),
    })
}

/// Checks a whole program against the scopes the host seeded.
///
/// Globals are checked in order first, so their initializers only see
/// earlier globals and host functions. Every user function is then
/// registered before any body is checked, which lets functions call each
/// other regardless of order.
pub fn analyze(source: &Source, scopes: StaticScopes) -> Result<Annotations, Error> {
    let mut analyzer = Analyzer::new(scopes);

    for global in &source.globals {
        analyze_global(&mut analyzer, global)?;
    }

    for function in &source.functions {
        declare_function(&mut analyzer, function)?;
    }

    require_main(&analyzer)?;

    for function in &source.functions {
        analyze_function(&mut analyzer, function)?;
    }

    Ok(analyzer.annotations)
}

fn analyze_global(analyzer: &mut Analyzer, global: &Global) -> Result<(), Error> {
    let ty = resolve_type(&global.type_name)?;

    match &global.initializer {
        Some(Expr { id, kind: ExprKind::ListLiteral(elements) }) => {
            for element in elements {
                let element_type = analyze_expr(analyzer, element)?;
                require_assignable(ty, element_type)?;
            }
            analyzer.annotations.record_type(*id, Type::Any);
        }
        Some(initializer) => {
            let initializer_type = analyze_expr(analyzer, initializer)?;
            require_assignable(ty, initializer_type)?;
        }
        None if !global.mutable => {
            return Err(Error::analysis(ErrorImpl::ImmutableWithoutValue {
                variable: global.name.clone(),
            }));
        }
        None => {}
    }

    analyzer.annotations.record_declaration(global.id, ty);
    analyzer
        .scopes
        .declare_variable(
            &global.name,
            VariableInfo {
                ty,
                mutable: global.mutable,
                is_list: global.is_list(),
                binding: VariableBinding::Global(global.id),
            },
        )
        .map_err(Error::analysis)
}

fn declare_function(analyzer: &mut Analyzer, function: &Function) -> Result<(), Error> {
    let parameter_types = function
        .parameter_type_names
        .iter()
        .map(|name| resolve_type(name))
        .collect::<Result<Vec<_>, _>>()?;

    let return_type = match &function.return_type_name {
        Some(name) => resolve_type(name)?,
        None => Type::Nil,
    };

    analyzer.annotations.record_declaration(function.id, return_type);
    analyzer
        .scopes
        .declare_function(
            &function.name,
            function.arity(),
            FunctionInfo {
                parameter_types,
                return_type,
                binding: FunctionBinding::User(function.id),
            },
        )
        .map_err(Error::analysis)
}

/// A program needs a user-defined `main` with no parameters returning `Integer`.
fn require_main(analyzer: &Analyzer) -> Result<(), Error> {
    match analyzer.scopes.get_function("main", 0) {
        Some(FunctionInfo { binding: FunctionBinding::User(_), return_type, .. }) => {
            require_assignable(Type::Integer, *return_type)
        }
        _ => Err(Error::analysis(ErrorImpl::MissingMain)),
    }
}

fn analyze_function(analyzer: &mut Analyzer, function: &Function) -> Result<(), Error> {
    let mark = analyzer.scopes.enter_function();
    let result = analyze_function_body(analyzer, function);
    analyzer.scopes.exit(mark);
    result
}

fn analyze_function_body(analyzer: &mut Analyzer, function: &Function) -> Result<(), Error> {
    let parameters = function
        .parameter_names
        .iter()
        .zip(&function.parameter_type_names)
        .enumerate();

    for (index, (name, type_name)) in parameters {
        let info = VariableInfo {
            ty: resolve_type(type_name)?,
            mutable: true,
            is_list: false,
            binding: VariableBinding::Parameter { function: function.id, index },
        };
        analyzer.scopes.declare_variable(name, info).map_err(Error::analysis)?;
    }

    analyzer.return_type = match &function.return_type_name {
        Some(name) => resolve_type(name)?,
        None => Type::Nil,
    };

    analyze_block(analyzer, &function.body)
}

pub fn analyze_block(analyzer: &mut Analyzer, block: &[Stmt]) -> Result<(), Error> {
    for stmt in block {
        analyze_stmt(analyzer, stmt)?;
    }
    Ok(())
}

/// Checks `block` inside a child frame that is dropped afterwards.
fn analyze_scoped_block(analyzer: &mut Analyzer, block: &[Stmt]) -> Result<(), Error> {
    let mark = analyzer.scopes.enter();
    let result = analyze_block(analyzer, block);
    analyzer.scopes.exit(mark);
    result
}

pub fn analyze_stmt(analyzer: &mut Analyzer, stmt: &Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Expression(expr) => analyze_expr(analyzer, expr).map(|_| ()),
        Stmt::Declaration(declaration) => analyze_declaration_stmt(analyzer, declaration),
        Stmt::Assignment(assignment) => analyze_assignment_stmt(analyzer, assignment),
        Stmt::If(if_stmt) => analyze_if_stmt(analyzer, if_stmt),
        Stmt::Switch(switch) => analyze_switch_stmt(analyzer, switch),
        Stmt::While(while_stmt) => analyze_while_stmt(analyzer, while_stmt),
        Stmt::Return(value) => {
            let value_type = analyze_expr(analyzer, value)?;
            require_assignable(analyzer.return_type, value_type)
        }
    }
}

fn analyze_declaration_stmt(analyzer: &mut Analyzer, declaration: &DeclarationStmt) -> Result<(), Error> {
    let declared = declaration
        .type_name
        .as_deref()
        .map(resolve_type)
        .transpose()?;

    // The initializer is checked before the name exists, so it sees any outer binding
    let initializer = declaration
        .initializer
        .as_ref()
        .map(|initializer| analyze_expr(analyzer, initializer))
        .transpose()?;

    let ty = match (declared, initializer) {
        (Some(declared), Some(initializer)) => {
            require_assignable(declared, initializer)?;
            declared
        }
        (Some(declared), None) => declared,
        (None, Some(initializer)) => initializer,
        (None, None) => {
            return Err(Error::analysis(ErrorImpl::MissingDeclarationType {
                variable: declaration.name.clone(),
            }))
        }
    };

    analyzer.annotations.record_declaration(declaration.id, ty);
    analyzer
        .scopes
        .declare_variable(
            &declaration.name,
            VariableInfo {
                ty,
                mutable: true,
                is_list: false,
                binding: VariableBinding::Local(declaration.id),
            },
        )
        .map_err(Error::analysis)
}

fn analyze_assignment_stmt(analyzer: &mut Analyzer, assignment: &AssignmentStmt) -> Result<(), Error> {
    if !matches!(assignment.receiver.kind, ExprKind::Access(_)) {
        return Err(Error::analysis(ErrorImpl::InvalidAssignmentTarget));
    }

    let target = analyze_expr(analyzer, &assignment.receiver)?;
    let value = analyze_expr(analyzer, &assignment.value)?;
    require_assignable(target, value)
}

fn analyze_condition(analyzer: &mut Analyzer, condition: &Expr) -> Result<(), Error> {
    let ty = analyze_expr(analyzer, condition)?;
    require_assignable(Type::Boolean, ty)
}

fn analyze_if_stmt(analyzer: &mut Analyzer, if_stmt: &IfStmt) -> Result<(), Error> {
    analyze_condition(analyzer, &if_stmt.condition)?;

    if if_stmt.then_block.is_empty() {
        return Err(Error::analysis(ErrorImpl::EmptyBlock {
            statement: String::from("IF"),
        }));
    }

    analyze_scoped_block(analyzer, &if_stmt.then_block)?;
    analyze_scoped_block(analyzer, &if_stmt.else_block)
}

fn analyze_while_stmt(analyzer: &mut Analyzer, while_stmt: &WhileStmt) -> Result<(), Error> {
    analyze_condition(analyzer, &while_stmt.condition)?;
    analyze_scoped_block(analyzer, &while_stmt.body)
}

fn analyze_switch_stmt(analyzer: &mut Analyzer, switch: &SwitchStmt) -> Result<(), Error> {
    let condition = analyze_expr(analyzer, &switch.condition)?;

    let defaults = switch.cases.iter().filter(|case| case.value.is_none()).count();
    let default_is_last = switch.cases.last().is_some_and(|case| case.value.is_none());
    if defaults != 1 || !default_is_last {
        return Err(Error::analysis(ErrorImpl::MisplacedDefault));
    }

    for case in &switch.cases {
        if let Some(value) = &case.value {
            let value_type = analyze_expr(analyzer, value)?;
            if value_type != condition {
                return Err(mismatch(condition, value_type));
            }
        }
        analyze_scoped_block(analyzer, &case.body)?;
    }

    Ok(())
}

/// Assigns a static type to `expr` and every expression below it.
pub fn analyze_expr(analyzer: &mut Analyzer, expr: &Expr) -> Result<Type, Error> {
    let ty = match &expr.kind {
        ExprKind::Literal(literal) => analyze_literal(literal)?,
        ExprKind::Group(inner) => {
            if !matches!(inner.kind, ExprKind::Binary(_)) {
                return Err(Error::analysis(ErrorImpl::InvalidGroup));
            }
            analyze_expr(analyzer, inner)?
        }
        ExprKind::Binary(binary) => analyze_binary_expr(analyzer, binary)?,
        ExprKind::Access(access) => analyze_access_expr(analyzer, expr, access)?,
        ExprKind::Call(call) => analyze_call_expr(analyzer, expr, call)?,
        ExprKind::ListLiteral(elements) => {
            for element in elements {
                analyze_expr(analyzer, element)?;
            }
            Type::Any
        }
    };

    Ok(analyzer.record(expr, ty))
}

fn analyze_literal(literal: &Literal) -> Result<Type, Error> {
    let out_of_range = |literal: String| Error::analysis(ErrorImpl::ValueOutOfRange { literal });

    match literal {
        Literal::Nil => Ok(Type::Nil),
        Literal::Boolean(_) => Ok(Type::Boolean),
        Literal::Character(_) => Ok(Type::Character),
        Literal::String(_) => Ok(Type::String),
        Literal::Integer(value) => match value.to_i64() {
            Some(_) => Ok(Type::Integer),
            None => Err(out_of_range(value.to_string())),
        },
        Literal::Decimal(value) if value.abs() <= *DECIMAL_LIMIT => Ok(Type::Decimal),
        Literal::Decimal(value) => Err(out_of_range(value.to_plain_string())),
    }
}

fn analyze_binary_expr(analyzer: &mut Analyzer, binary: &BinaryExpr) -> Result<Type, Error> {
    let left = analyze_expr(analyzer, &binary.left)?;
    let right = analyze_expr(analyzer, &binary.right)?;

    match binary.operator {
        BinaryOperator::And | BinaryOperator::Or => {
            require_assignable(Type::Boolean, left)?;
            require_assignable(Type::Boolean, right)?;
            Ok(Type::Boolean)
        }
        BinaryOperator::Less | BinaryOperator::Greater => {
            require_same(left, right)?;
            if !left.is_comparable() {
                return Err(mismatch(Type::Comparable, left));
            }
            Ok(Type::Boolean)
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => {
            require_same(left, right)?;
            if !left.is_comparable() && left != Type::Boolean {
                return Err(mismatch(Type::Comparable, left));
            }
            Ok(Type::Boolean)
        }
        BinaryOperator::Add if left == Type::String || right == Type::String => Ok(Type::String),
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide => {
            require_same(left, right)?;
            if !left.is_numeric() {
                return Err(mismatch("Integer or Decimal", left));
            }
            Ok(left)
        }
        BinaryOperator::Power => {
            require_assignable(Type::Integer, left)?;
            require_assignable(Type::Integer, right)?;
            Ok(Type::Integer)
        }
    }
}

fn require_same(left: Type, right: Type) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        Err(mismatch(left, right))
    }
}

fn analyze_access_expr(analyzer: &mut Analyzer, expr: &Expr, access: &AccessExpr) -> Result<Type, Error> {
    let variable = analyzer
        .scopes
        .get_variable(&access.name)
        .cloned()
        .ok_or_else(|| {
            Error::analysis(ErrorImpl::VariableNotDeclared {
                variable: access.name.clone(),
            })
        })?;

    analyzer.annotations.record_variable(expr.id, variable.binding);

    let Some(index) = &access.index else {
        // A bare list is only usable where anything goes
        return Ok(if variable.is_list { Type::Any } else { variable.ty });
    };

    let index_type = analyze_expr(analyzer, index)?;
    require_assignable(Type::Integer, index_type)?;

    if variable.is_list || variable.ty == Type::Any {
        Ok(variable.ty)
    } else {
        Err(Error::analysis(ErrorImpl::NotAList {
            variable: access.name.clone(),
        }))
    }
}

fn analyze_call_expr(analyzer: &mut Analyzer, expr: &Expr, call: &CallExpr) -> Result<Type, Error> {
    let function = analyzer
        .scopes
        .get_function(&call.name, call.arguments.len())
        .cloned()
        .ok_or_else(|| {
            Error::analysis(ErrorImpl::FunctionNotDeclared {
                function: call.name.clone(),
                arity: call.arguments.len(),
            })
        })?;

    for (argument, parameter_type) in call.arguments.iter().zip(&function.parameter_types) {
        let argument_type = analyze_expr(analyzer, argument)?;
        require_assignable(*parameter_type, argument_type)?;
    }

    analyzer.annotations.record_function(expr.id, function.binding);
    Ok(function.return_type)
}
