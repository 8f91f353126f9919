use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::ast::ast::NodeKind;

lazy_static! {
    /// Words that start a construct and therefore never scan as a plain value.
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("fun");
        set.insert("var");
        set.insert("attr");
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("for");
        set.insert("try");
        set.insert("catch");
        set.insert("finally");
        set.insert("return");
        set.insert("break");
        set
    };

    /// Number literal patterns, tried in order. All are anchored at the cursor.
    pub static ref NUMBER_PATTERNS: Vec<(Regex, NodeKind)> = vec![
        (number_regex(r"^[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?"), NodeKind::Float),
        (number_regex(r"^0[xX][0-9a-fA-F]+"), NodeKind::Int),
        (number_regex(r"^0[bB][01]+"), NodeKind::Int),
        (number_regex(r"^[0-9]+"), NodeKind::Int),
    ];
}

fn number_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid number pattern {pattern}: {err}"))
}

/// Characters that, directly after a non-strict operator, mean the operator
/// is only the prefix of a longer one (`=` inside `==`, `+` inside `+=`).
pub const OPERATOR_GUARD: [char; 6] = ['+', '-', '*', '/', '=', '.'];

pub const MULTILINE_COMMENT: (&str, &str) = ("/*", "*/");
pub const SINGLELINE_COMMENT: &str = "//";

pub fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_LOOKUP.contains(word)
}
