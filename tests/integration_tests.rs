//! Integration tests for the whole pipeline.
//!
//! These tests verify that source text goes through tokenization, parsing,
//! analysis and interpretation and produces the expected value, output or
//! error.

use std::{cell::RefCell, rc::Rc, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use quill::{
    analyzer::annotations::Annotations,
    ast::{ast::Source, expressions::ExprKind, statements::Stmt, types::Type},
    check,
    errors::errors::{ErrorImpl, ErrorStage},
    evaluate,
    interpreter::{
        interpreter::{run, RuntimeScopes},
        value::Value,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error, Builtin, DecimalDivision, Options,
};

/// A `print` builtin whose output lands in the returned buffer.
fn printer() -> (Builtin, Rc<RefCell<Vec<String>>>) {
    let output = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&output);
    let print = Builtin::print(move |line| sink.borrow_mut().push(line.to_string()));
    (print, output)
}

/// A `capture` builtin that keeps the values it is given.
fn capturer() -> (Builtin, Rc<RefCell<Vec<Value>>>) {
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let capture = Builtin::new("capture", vec![Type::Any], Type::Nil, move |arguments| {
        sink.borrow_mut().extend(arguments.iter().cloned());
        Value::Nil
    });
    (capture, values)
}

fn evaluate_text(text: &str) -> Result<(Value, Vec<String>), quill::errors::errors::Error> {
    let (print, output) = printer();
    let value = evaluate(text, &[print], Options::default())?;
    let lines = output.borrow().clone();
    Ok((value, lines))
}

fn integer(value: i64) -> Value {
    Value::Integer(BigInt::from(value))
}

#[test]
fn test_minimal_program_returns_zero() {
    let text = "FUN main(): Integer DO RETURN 0; END";

    assert!(check(text, &[]).is_ok());
    assert_eq!(evaluate(text, &[], Options::default()).unwrap(), integer(0));
}

#[test]
fn test_main_signature_is_enforced() {
    let with_parameter = "FUN main(code: Integer): Integer DO RETURN code; END";
    let error = check(with_parameter, &[]).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Analysis);
    assert_eq!(error.kind(), &ErrorImpl::MissingMain);

    let returns_string = "FUN main(): String DO RETURN \"0\"; END";
    let error = check(returns_string, &[]).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Analysis);
    assert_eq!(
        error.kind(),
        &ErrorImpl::TypeMatchError {
            expected: String::from("Integer"),
            received: String::from("String"),
        }
    );
}

#[test]
fn test_globals_loops_and_dispatch() {
    let text = r#"
VAR x: Integer = 10;
VAR y: Integer = 20;
VAR z: Integer = 6;

FUN add(a: Integer, b: Integer): Integer DO
    RETURN a + b;
END

FUN add(a: Integer, b: Integer, c: Integer): Integer DO
    RETURN a + b + c;
END

FUN main(): Integer DO
    LET c: Integer = 0;
    WHILE z > 0 DO
        IF z > 3 DO
            c = add(c, x * z);
        ELSE
            IF z == 2 DO
                c = add(c, y * z, x ^ 2);
            ELSE
                IF z == 3 DO
                    c = add(c, y);
                ELSE
                    c = add(c, y - x / 2);
                END
            END
        END
        z = z - 1;
    END
    RETURN c;
END
"#;

    let (value, _) = evaluate_text(text).unwrap();
    assert_eq!(value, integer(325));
}

/// The single argument of the first call in `main`.
fn first_argument_type(source: &Source, annotations: &Annotations) -> Option<Type> {
    let Stmt::Expression(call) = &source.functions[0].body[0] else {
        return None;
    };
    let ExprKind::Call(call) = &call.kind else {
        return None;
    };
    annotations.type_of(call.arguments[0].id)
}

#[test]
fn test_literals_round_trip() {
    let cases = [
        ("TRUE", Type::Boolean, Value::Boolean(true)),
        ("FALSE", Type::Boolean, Value::Boolean(false)),
        ("NIL", Type::Nil, Value::Nil),
        ("42", Type::Integer, integer(42)),
        ("-9223372036854775808", Type::Integer, integer(i64::MIN)),
        ("2.25", Type::Decimal, Value::Decimal(BigDecimal::from_str("2.25").unwrap())),
        ("'\\t'", Type::Character, Value::Character('\t')),
        ("\"tab\\tquote\\\"\"", Type::String, Value::String(String::from("tab\tquote\""))),
    ];

    for (literal, ty, value) in cases {
        let text = format!("FUN main(): Integer DO capture({}); RETURN 0; END", literal);
        let (capture, captured) = capturer();

        let (source, annotations) = check(&text, &[capture.clone()]).unwrap();
        assert_eq!(first_argument_type(&source, &annotations), Some(ty), "{}", literal);

        evaluate(&text, &[capture], Options::default()).unwrap();
        assert_eq!(captured.borrow().as_slice(), &[value], "{}", literal);
    }
}

#[test]
fn test_short_circuit_skips_failing_operand() {
    let text = "LIST xs: Integer = [1];\n\
                FUN main(): Integer DO\n\
                  IF FALSE && 1 / 0 == 0 DO RETURN 1; END\n\
                  IF TRUE || xs[5] == 0 DO RETURN 2; END\n\
                  RETURN 3;\n\
                END";

    assert_eq!(evaluate_text(text).unwrap().0, integer(2));
}

#[test]
fn test_short_circuit_skips_undefined_name() {
    // Straight to the interpreter: the analyzer would reject the name
    let text = "FUN main(): Integer DO\n\
                  IF FALSE && undefined DO RETURN 1; END\n\
                  IF TRUE || undefined DO RETURN 2; END\n\
                  RETURN 3;\n\
                END";
    let source = parse(tokenize(text).unwrap()).unwrap();

    let value = run(&source, RuntimeScopes::new(), Options::default()).unwrap();
    assert_eq!(value, integer(2));
}

#[test]
fn test_switch_has_no_fallthrough() {
    let text = r#"
FUN answer(c: Character) DO
    SWITCH c
        CASE 'y':
            print("yes");
        CASE 'n':
            print("no");
        DEFAULT
            print("unknown");
    END
END

FUN main(): Integer DO
    answer('y');
    RETURN 0;
END
"#;

    let (_, output) = evaluate_text(text).unwrap();
    assert_eq!(output, vec!["yes"]);
}

#[test]
fn test_block_scoping_three_levels_deep() {
    let text = "FUN main(): Integer DO\n\
                  LET n = 1;\n\
                  IF n > 0 DO\n\
                    WHILE n < 2 DO\n\
                      SWITCH n CASE 1: LET hidden = 5; n = n + hidden; DEFAULT n = 2; END\n\
                    END\n\
                  END\n\
                  RETURN hidden;\n\
                END";

    let error = evaluate_text(text).unwrap_err();
    assert_eq!(error.get_stage(), ErrorStage::Analysis);
    assert_eq!(
        error.kind(),
        &ErrorImpl::VariableNotDeclared {
            variable: String::from("hidden")
        }
    );
}

#[test]
fn test_exponent_edge_cases() {
    let power = |expression: &str| {
        let text = format!("FUN main(): Integer DO RETURN {}; END", expression);
        evaluate_text(&text).unwrap().0
    };

    assert_eq!(power("5 ^ -2"), integer(0));
    assert_eq!(power("1 ^ -2"), integer(1));
    assert_eq!(power("2 ^ 0"), integer(1));
    assert_eq!(power("2 ^ 2500"), Value::Integer(BigInt::from(2).pow(2500)));
}

#[test]
fn test_lists_alias_through_calls() {
    let text = r#"
LIST scores: Integer = [1, 2, 3];

FUN reset(list: Any, index: Integer) DO
    list[index] = 0;
END

FUN main(): Integer DO
    reset(scores, 1);
    print(scores);
    RETURN scores[0] + scores[1] + scores[2];
END
"#;

    let (value, output) = evaluate_text(text).unwrap();
    assert_eq!(value, integer(4));
    assert_eq!(output, vec!["[1, 0, 3]"]);
}

#[test]
fn test_print_formats_values() {
    let text = r#"
FUN main(): Integer DO
    print(1);
    print(3.0);
    print('c');
    print("text");
    print(TRUE);
    print(NIL);
    print("sum: " + (1 + 2));
    RETURN 0;
END
"#;

    let (_, output) = evaluate_text(text).unwrap();
    assert_eq!(output, vec!["1", "3.0", "c", "text", "true", "NIL", "sum: 3"]);
}

#[test]
fn test_errors_report_their_stage() {
    let lex = evaluate_text("FUN main(): Integer DO RETURN 01; END").unwrap_err();
    assert_eq!(lex.get_stage(), ErrorStage::Lex);
    assert_eq!(lex.get_position().map(|position| position.0), Some(31));

    let parse = evaluate_text("FUN main(): Integer DO RETURN 1 END").unwrap_err();
    assert_eq!(parse.get_stage(), ErrorStage::Parse);
    assert_eq!(parse.get_position().map(|position| position.0), Some(32));

    let runtime = evaluate_text("FUN main(): Integer DO RETURN 1 / 0; END").unwrap_err();
    assert_eq!(runtime.get_stage(), ErrorStage::Runtime);
    assert_eq!(runtime.kind(), &ErrorImpl::DivisionByZero);
}

#[test]
fn test_render_parse_error() {
    let text = "FUN main(): Integer DO\n  RETURN 1 END";
    let error = evaluate_text(text).unwrap_err();

    let rendered = render_error(&error, text, "main.ql");
    assert!(rendered.contains("-> main.ql"));
    assert!(rendered.contains("2 | RETURN 1 END"));
    assert!(rendered.contains("  | ---------^"));
}

#[test]
fn test_decimals_are_exact() {
    let text = r#"
FUN main(): Integer DO
    LET total: Decimal = 0.0;
    LET i = 0;
    WHILE i < 10 DO
        total = total + 0.1;
        i = i + 1;
    END
    print(total);
    print(total == 1.0);
    print(0.1 + 0.2 == 0.3);
    RETURN 0;
END
"#;

    let (_, output) = evaluate_text(text).unwrap();
    assert_eq!(output, vec!["1.0", "true", "true"]);
}

#[test]
fn test_list_holding_itself_prints() {
    let text = r#"
LIST a: Any = [1, 2];

FUN main(): Integer DO
    a[1] = a;
    print(a);
    RETURN 0;
END
"#;

    let (_, output) = evaluate_text(text).unwrap();
    assert_eq!(output, vec!["[1, [...]]"]);
}

#[test]
fn test_decimal_division_policy() {
    let text = "FUN main(): Integer DO print(2.0 / 3.0); RETURN 0; END";
    let (print, output) = printer();
    let options = Options {
        decimal_division: DecimalDivision::Scaled(2),
    };

    evaluate(text, &[print], options).unwrap();
    assert_eq!(output.borrow().as_slice(), &[String::from("0.67")]);
}
