#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::{FunctionDef, Module},
    compiler::compiler::{transpile, TranspileOptions},
    errors::errors::{Error, ErrorImpl, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Picks the function called `name` out of `module`, or the first one when
/// no name is given.
pub fn select_function<'a>(
    module: &'a Module,
    name: Option<&str>,
    file: &str,
) -> Result<&'a FunctionDef, Error> {
    let found = match name {
        Some(name) => module.functions.iter().find(|function| function.name == name),
        None => module.functions.first(),
    };

    found.ok_or_else(|| {
        Error::new(
            ErrorImpl::FunctionNotFound {
                function: name.unwrap_or("<any>").to_string(),
            },
            Position(0, Rc::new(file.to_string())),
        )
    })
}

/// Runs the whole pipeline on `source`: tokenize, parse, then transpile the
/// function called `function` (or the first one when `None`).
pub fn transpile_source(
    source: &str,
    file: &str,
    function: Option<&str>,
    options: &TranspileOptions,
) -> Result<String, Error> {
    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    let module = parse(tokens, Rc::new(file.to_string())).1?;

    transpile(select_function(&module, function, file)?, options)
}

/// Returns the 1-based line number, the line text and the offset of
/// `position` inside that line. Offsets past the end land on the last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len());

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        last = (line_number, line.to_string(), line.trim_end_matches('\n').len());
        start = end;
        line_number += 1;
    }

    last
}


/// Formats an error as a caret diagnostic against `source`.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> sample.py
          |
        2 |     return x
          | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
