//! Error types and error handling for the parser.
//!
//! Every hard failure of the grammar is reported as a single [`errors::Error`]
//! carrying the reason, a point position and the source name. Its `Display`
//! form is the user facing message:
//!
//! `[Error] {reason} " in '{file}' at ({line}, {column})`

pub mod errors;

#[cfg(test)]
mod tests;
