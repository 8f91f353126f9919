//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! A recursive-descent parser working directly on the source text. Rules
//! push matched leaves onto a shared build stack; a rule that matched more
//! than one piece collapses everything above its entry watermark into one
//! composite node. It handles:
//!
//! - The expression precedence chain, from dot access to assignment
//! - Values: literals, calls, indexing, inline arrays, maps and ranges, lambdas
//! - Function and method definitions with annotations
//! - Control flow blocks, statement sequences and whole files
//!
//! There is no error recovery: the first hard error aborts the parse.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
