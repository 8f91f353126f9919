#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use crate::ast::ast::{Node, NodeKind};
pub use crate::parser::parser::{parse, Parser};

/// Source name reserved for text that was evaluated inline instead of being
/// loaded from a file.
pub const EVAL_SOURCE: &str = "__EVAL__";

/// A point in the source text. Both fields are 1-based and the column resets
/// on every newline, so the derived ordering is the scanning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn point(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }
}

/// Returns the text of the 1-based `line` in `content`, without its line
/// terminator.
pub fn get_line_at_position(content: &str, position: &Position) -> Option<String> {
    content
        .split('\n')
        .nth(position.line.saturating_sub(1) as usize)
        .map(|line| line.trim_end_matches('\r').to_string())
}


/// Renders `error` with the offending source line and a caret under the
/// error column.
///
/// ```text
/// [Error] Unparsed input " in 'demo.cyas' at (20, 9)
/// -> demo.cyas
///    |
/// 20 | let a = #;
///    | --------^
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut rendered = String::new();

    rendered.push_str(&error.to_string());
    rendered.push('\n');
    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        rendered.push_str(&format!("help: {}\n", tip));
    }
    rendered.push_str(&format!("-> {}\n", error.get_file()));

    let Some(line_text) = get_line_at_position(source, position) else {
        return rendered;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
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

    (string.chars().skip(start).collect(), start)
}
