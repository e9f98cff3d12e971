use crate::{
    ast::{
        ast::{Function, Global},
        expressions::{Expr, ExprKind},
        statements::{
            AssignmentStmt, Case, DeclarationStmt, IfStmt, Stmt, SwitchStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Keyword,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .current_token()
        .and_then(|token| token.keyword())
        .and_then(|keyword| parser.get_stmt_lookup().get(&keyword).copied());

    if let Some(handler) = handler {
        return handler(parser);
    }

    let receiver = parse_expr(parser, BindingPower::Default)?;

    // One token of lookahead decides between assignment and a bare expression
    if parser.match_operator("=") {
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect_operator(";")?;
        return Ok(Stmt::Assignment(AssignmentStmt { receiver, value }));
    }

    parser.expect_operator(";")?;
    Ok(Stmt::Expression(receiver))
}

/// Parses statements up to (not including) `END`, `ELSE`, `DEFAULT` or `CASE`.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut statements = Vec::new();

    while parser.has_tokens()
        && !parser.peek_keyword(Keyword::End)
        && !parser.peek_keyword(Keyword::Else)
        && !parser.peek_keyword(Keyword::Default)
        && !parser.peek_keyword(Keyword::Case)
    {
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect_keyword(Keyword::Let, "LET")?;
    let name = parser.expect_identifier("a variable name")?;

    let type_name = if parser.match_operator(":") {
        Some(parser.expect_identifier("a type name")?)
    } else {
        None
    };

    let initializer = if parser.match_operator("=") {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_operator(";")?;

    Ok(Stmt::Declaration(DeclarationStmt {
        id: parser.advance_id(),
        name,
        type_name,
        initializer,
    }))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect_keyword(Keyword::Switch, "SWITCH")?;
    let condition = parse_expr(parser, BindingPower::Default)?;

    let mut cases = Vec::new();
    while parser.match_case()? {
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect_operator(":")?;
        let body = parse_block(parser)?;
        cases.push(Case { value: Some(value), body });
    }

    if !parser.peek_keyword(Keyword::Default) {
        return Err(parser.error_at_current(ErrorImpl::MisplacedDefault));
    }
    parser.advance("DEFAULT")?;
    let body = parse_block(parser)?;
    cases.push(Case { value: None, body });

    // The default arm closes the case list
    if parser.peek_keyword(Keyword::Default) || parser.peek_keyword(Keyword::Case) {
        return Err(parser.error_at_current(ErrorImpl::MisplacedDefault));
    }
    parser.expect_keyword(Keyword::End, "END")?;

    Ok(Stmt::Switch(SwitchStmt { condition, cases }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect_keyword(Keyword::If, "IF")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_keyword(Keyword::Do, "DO")?;
    let then_block = parse_block(parser)?;

    let else_block = if parser.peek_keyword(Keyword::Else) {
        parser.advance("ELSE")?;
        parse_block(parser)?
    } else {
        Vec::new()
    };

    parser.expect_keyword(Keyword::End, "END")?;

    Ok(Stmt::If(IfStmt { condition, then_block, else_block }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect_keyword(Keyword::While, "WHILE")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_keyword(Keyword::Do, "DO")?;
    let body = parse_block(parser)?;
    parser.expect_keyword(Keyword::End, "END")?;

    Ok(Stmt::While(WhileStmt { condition, body }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect_keyword(Keyword::Return, "RETURN")?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect_operator(";")?;

    Ok(Stmt::Return(value))
}

/// `LIST name: Type = [a, b, c];` or `(VAR | VAL) name: Type (= value)?;`
pub fn parse_global(parser: &mut Parser) -> Result<Global, Error> {
    let is_list = parser.peek_keyword(Keyword::List);
    let mutable = is_list || parser.peek_keyword(Keyword::Var);
    parser.advance("LIST, VAR or VAL")?;

    let name = parser.expect_identifier("a global name")?;
    parser.expect_operator(":")?;
    let type_name = parser.expect_identifier("a type name")?;

    let initializer = if is_list {
        parser.expect_operator("=")?;
        parser.expect_operator("[")?;
        Some(parse_list_literal(parser)?)
    } else if parser.match_operator("=") {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_operator(";")?;

    Ok(Global {
        id: parser.advance_id(),
        name,
        type_name,
        mutable,
        initializer,
    })
}

/// Parses `expr (, expr)* ]` after the opening bracket has been consumed.
fn parse_list_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let mut elements = vec![];

    loop {
        elements.push(parse_expr(parser, BindingPower::Default)?);

        if parser.match_operator(",") {
            if parser.peek_operator("]") {
                return Err(parser.error_at_current(ErrorImpl::TrailingComma));
            }
        } else {
            parser.expect_operator("]")?;
            break;
        }
    }

    Ok(Expr::new(parser.advance_id(), ExprKind::ListLiteral(elements)))
}

/// `FUN name((param: Type (, param: Type)*)?) (: Type)? DO block END`
pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    parser.expect_keyword(Keyword::Fun, "FUN")?;
    let name = parser.expect_identifier("a function name")?;
    parser.expect_operator("(")?;

    let mut parameter_names = Vec::new();
    let mut parameter_type_names = Vec::new();

    if !parser.match_operator(")") {
        loop {
            parameter_names.push(parser.expect_identifier("a parameter name")?);
            parser.expect_operator(":")?;
            parameter_type_names.push(parser.expect_identifier("a type name")?);

            if parser.match_operator(",") {
                if parser.peek_operator(")") {
                    return Err(parser.error_at_current(ErrorImpl::TrailingComma));
                }
            } else {
                parser.expect_operator(")")?;
                break;
            }
        }
    }

    let return_type_name = if parser.match_operator(":") {
        Some(parser.expect_identifier("a type name")?)
    } else {
        None
    };

    parser.expect_keyword(Keyword::Do, "DO")?;
    let body = parse_block(parser)?;
    parser.expect_keyword(Keyword::End, "END")?;

    Ok(Function {
        id: parser.advance_id(),
        name,
        parameter_names,
        parameter_type_names,
        return_type_name,
        body,
    })
}

impl Parser {
    /// Consumes a `CASE` keyword if one is next.
    fn match_case(&mut self) -> Result<bool, Error> {
        if self.peek_keyword(Keyword::Case) {
            self.advance("CASE")?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
