use crate::{
    ast::{
        expressions::ExprKind,
        statements::{AssignmentStmt, DeclarationStmt, IfStmt, Stmt, SwitchStmt, WhileStmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    expr::{evaluate_condition, evaluate_expression, evaluate_index, list_of},
    interpreter::{require_value, Flow, Interpreter, RuntimeVariable},
    value::Value,
};

/// Executes statements in order, stopping at the first `RETURN`.
pub fn execute_block(interpreter: &mut Interpreter, block: &[Stmt]) -> Result<Flow, Error> {
    for statement in block {
        if let Flow::Return(value) = execute_statement(interpreter, statement)? {
            return Ok(Flow::Return(value));
        }
    }
    Ok(Flow::Continue)
}

/// Executes `block` in a child frame that is popped on every exit path.
fn execute_scoped_block(interpreter: &mut Interpreter, block: &[Stmt]) -> Result<Flow, Error> {
    let mark = interpreter.scopes.enter();
    let flow = execute_block(interpreter, block);
    interpreter.scopes.exit(mark);
    flow
}

pub fn execute_statement(interpreter: &mut Interpreter, statement: &Stmt) -> Result<Flow, Error> {
    match statement {
        Stmt::Expression(expression) => {
            evaluate_expression(interpreter, expression)?;
            Ok(Flow::Continue)
        }
        Stmt::Declaration(declaration) => {
            execute_declaration(interpreter, declaration)?;
            Ok(Flow::Continue)
        }
        Stmt::Assignment(assignment) => {
            execute_assignment(interpreter, assignment)?;
            Ok(Flow::Continue)
        }
        Stmt::If(if_stmt) => execute_if(interpreter, if_stmt),
        Stmt::Switch(switch) => {
            let mark = interpreter.scopes.enter();
            let flow = execute_switch(interpreter, switch);
            interpreter.scopes.exit(mark);
            flow
        }
        Stmt::While(while_stmt) => execute_while(interpreter, while_stmt),
        Stmt::Return(value) => Ok(Flow::Return(evaluate_expression(interpreter, value)?)),
    }
}

fn execute_declaration(interpreter: &mut Interpreter, declaration: &DeclarationStmt) -> Result<(), Error> {
    let value = match &declaration.initializer {
        Some(initializer) => evaluate_expression(interpreter, initializer)?,
        None => Value::Nil,
    };

    // Untyped declarations take the initializer's type
    let ty = match &declaration.type_name {
        Some(name) => Type::from_name(name).map_err(Error::runtime)?,
        None => value.get_type(),
    };
    if declaration.initializer.is_some() {
        require_value(ty, &value)?;
    }

    interpreter
        .scopes
        .declare_variable(&declaration.name, RuntimeVariable::new(value, ty, true))
        .map_err(Error::runtime)
}

fn execute_assignment(interpreter: &mut Interpreter, assignment: &AssignmentStmt) -> Result<(), Error> {
    let ExprKind::Access(access) = &assignment.receiver.kind else {
        return Err(Error::runtime(ErrorImpl::InvalidAssignmentTarget));
    };

    let index = match &access.index {
        Some(index) => Some(evaluate_expression(interpreter, index)?),
        None => None,
    };
    let value = evaluate_expression(interpreter, &assignment.value)?;

    let variable = interpreter
        .scopes
        .get_variable_mut(&access.name)
        .ok_or_else(|| {
            Error::runtime(ErrorImpl::VariableNotDeclared {
                variable: access.name.clone(),
            })
        })?;

    require_value(variable.slot_type(index.is_some()), &value)?;

    match index {
        None if !variable.mutable => Err(Error::runtime(ErrorImpl::ImmutableAssignment {
            variable: access.name.clone(),
        })),
        None => {
            variable.value = value;
            Ok(())
        }
        Some(index) => {
            let list = list_of(&access.name, &variable.value)?;
            let mut elements = list.borrow_mut();
            let position = evaluate_index(&index, elements.len())?;
            elements[position] = value;
            Ok(())
        }
    }
}

fn execute_if(interpreter: &mut Interpreter, if_stmt: &IfStmt) -> Result<Flow, Error> {
    if evaluate_condition(interpreter, &if_stmt.condition)? {
        execute_scoped_block(interpreter, &if_stmt.then_block)
    } else {
        execute_scoped_block(interpreter, &if_stmt.else_block)
    }
}

fn execute_while(interpreter: &mut Interpreter, while_stmt: &WhileStmt) -> Result<Flow, Error> {
    while evaluate_condition(interpreter, &while_stmt.condition)? {
        // Each iteration gets its own frame
        if let Flow::Return(value) = execute_scoped_block(interpreter, &while_stmt.body)? {
            return Ok(Flow::Return(value));
        }
    }
    Ok(Flow::Continue)
}

/// Runs the first case whose value equals the condition, or the default.
fn execute_switch(interpreter: &mut Interpreter, switch: &SwitchStmt) -> Result<Flow, Error> {
    let condition = evaluate_expression(interpreter, &switch.condition)?;

    for case in &switch.cases {
        let matches = match &case.value {
            Some(value) => evaluate_expression(interpreter, value)? == condition,
            None => true,
        };

        if matches {
            return execute_scoped_block(interpreter, &case.body);
        }
    }

    Ok(Flow::Continue)
}
