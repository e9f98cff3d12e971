#![allow(clippy::module_inception)]

use std::{rc::Rc, time::Instant};

use crate::{
    analyzer::{
        analyzer::{analyze, FunctionInfo, StaticScopes},
        annotations::{Annotations, FunctionBinding},
    },
    ast::{ast::Source, types::Type},
    errors::errors::{Error, ErrorTip},
    interpreter::{
        interpreter::{run, NativeFunction, RuntimeFunction, RuntimeScopes},
        value::Value,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;

extern crate regex;

/// A byte offset into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position(pub usize);

/// How `/` treats decimal quotients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalDivision {
    /// Full double precision
    #[default]
    Unscaled,
    /// Rounded half-to-even to this many fractional digits
    Scaled(u32),
}

/// Knobs the host can turn when evaluating a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub decimal_division: DecimalDivision,
}

/// A function supplied by the host, visible to every program as a global.
#[derive(Clone)]
pub struct Builtin {
    pub name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub callable: NativeFunction,
}

impl Builtin {
    pub fn new(
        name: &str,
        parameter_types: Vec<Type>,
        return_type: Type,
        callable: impl Fn(&[Value]) -> Value + 'static,
    ) -> Self {
        Builtin {
            name: name.to_string(),
            parameter_types,
            return_type,
            callable: Rc::new(callable),
        }
    }

    /// `print(Any): Nil`, handing the printed form of its argument to `sink`.
    pub fn print(sink: impl Fn(&str) + 'static) -> Self {
        Builtin::new("print", vec![Type::Any], Type::Nil, move |arguments| {
            if let Some(value) = arguments.first() {
                sink(&value.to_string());
            }
            Value::Nil
        })
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

fn static_scopes(builtins: &[Builtin]) -> Result<StaticScopes, Error> {
    let mut scopes = StaticScopes::new();
    for builtin in builtins {
        let info = FunctionInfo {
            parameter_types: builtin.parameter_types.clone(),
            return_type: builtin.return_type,
            binding: FunctionBinding::Builtin {
                name: builtin.name.clone(),
                arity: builtin.arity(),
            },
        };
        scopes
            .declare_function(&builtin.name, builtin.arity(), info)
            .map_err(Error::analysis)?;
    }
    Ok(scopes)
}

fn runtime_scopes<'a>(builtins: &[Builtin]) -> Result<RuntimeScopes<'a>, Error> {
    let mut scopes = RuntimeScopes::new();
    for builtin in builtins {
        scopes
            .declare_function(
                &builtin.name,
                builtin.arity(),
                RuntimeFunction::Native(Rc::clone(&builtin.callable)),
            )
            .map_err(Error::runtime)?;
    }
    Ok(scopes)
}

/// Lexes, parses and analyzes `text`, returning the tree and what the
/// analyzer learned about it.
pub fn check(text: &str, builtins: &[Builtin]) -> Result<(Source, Annotations), Error> {
    let start = Instant::now();
    let tokens = tokenize(text)?;
    tracing::debug!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let source = parse(tokens)?;
    tracing::debug!(
        globals = source.globals.len(),
        functions = source.functions.len(),
        elapsed = ?parse_start.elapsed(),
        "parsed"
    );

    let analyze_start = Instant::now();
    let annotations = analyze(&source, static_scopes(builtins)?)?;
    tracing::debug!(elapsed = ?analyze_start.elapsed(), "analyzed");

    Ok((source, annotations))
}

/// Runs the whole pipeline and returns the value `main` returned.
pub fn evaluate(text: &str, builtins: &[Builtin], options: Options) -> Result<Value, Error> {
    let (source, _) = check(text, builtins)?;
    run(&source, runtime_scopes(builtins)?, options)
}

/// Finds the 1-based line holding byte `position`, the line's text, and
/// the offset of `position` within it. Positions past the end point just
/// after the last character.
pub fn get_line_at_position(content: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        start = end;
        line_number += 1;
    }

    // Past the end: stay on the last line
    match content.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => {
            (line_number - 1, line.to_string(), line.len())
        }
        _ => (line_number, String::new(), 0),
    }
}

/// Formats an error the way a terminal host would print it:
///
/// ```text
/// Error: UnexpectedToken (Expected `;`)
/// -> main.ql
///   |
/// 2 | LET a = 1
///   | ---------^
/// ```
///
/// Errors without a position only get the first two lines.
pub fn render_error(error: &Error, source: &str, file_name: &str) -> String {
    let mut rendered = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    rendered.push_str(&format!("-> {}\n", file_name));

    let Some(position) = error.get_position() else {
        rendered.push_str(&format!("{}\n", error));
        return rendered;
    };

    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();
    (String::from(&string[start..]), start)
}
