//! Lexical primitives of the grammar.
//!
//! There is no separate token stream: the parser drives these primitives
//! directly over one shared cursor. They cover:
//!
//! - Whitespace and comment skipping (`/* */` may span lines)
//! - Statement separators (newline or `;`)
//! - Symbols, guarded operators and keywords
//! - Identifiers, annotations, number and quoted literals

pub mod lexer;
pub mod tokens;
