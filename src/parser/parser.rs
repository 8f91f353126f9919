//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct: the shared cursor, the build
//! stack and the helpers every grammar rule is written with.
//!
//! Grammar rules return `Result<bool, Error>`. `Ok(false)` means the rule did
//! not match and left cursor and stack as it found them, so the caller may
//! try another alternative. `Err` is a hard error that aborts the parse.

use std::rc::Rc;

use log::{debug, info, trace};

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::{Cursor, Lexer},
    Position, Span, MK_COMPOSITE, MK_NODE,
};

use super::{
    expr::parse_equation,
    stmt::{parse_break, parse_def, parse_for, parse_if, parse_return, parse_try, parse_while},
};

/// Cursor and build-stack depth, restored together when a rule backs out.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    cursor: Cursor,
    depth: usize,
}

/// The parsing state for one input: the cursor over the source, the source
/// name used in diagnostics, and the stack of nodes matched so far.
///
/// A parser may be reused; every call to [`Parser::parse`] starts from a
/// clean state.
pub struct Parser {
    /// Cursor and lexical primitives over the current input
    lexer: Lexer,
    /// The name of the source being parsed, or `EVAL_SOURCE`
    file: Rc<String>,
    /// Nodes matched so far, collapsed into composites as rules complete
    match_stack: Vec<Node>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(""),
            file: Rc::new(String::new()),
            match_stack: Vec::new(),
        }
    }

    /// Parses `source` into a `File` node.
    ///
    /// `file` names the source in error messages; pass `EVAL_SOURCE` for
    /// text that does not come from a file.
    pub fn parse(&mut self, source: &str, file: &str) -> Result<Node, Error> {
        self.lexer.reset(source);
        self.file = Rc::new(String::from(file));
        self.match_stack.clear();

        info!("parsing '{}' ({} bytes)", file, source.len());

        let result = parse_file(self);
        self.match_stack.clear();

        match &result {
            Ok(node) => info!("parsed '{}' into {} top-level nodes", file, node.children.len()),
            Err(error) => debug!("parse of '{}' failed: {}", file, error),
        }

        result
    }

    pub fn lexer(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    pub fn get_position(&self) -> Position {
        self.lexer.position()
    }

    pub fn depth(&self) -> usize {
        self.match_stack.len()
    }

    pub fn last(&self) -> Option<&Node> {
        self.match_stack.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Node> {
        self.match_stack.last_mut()
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.match_stack.pop()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.lexer.cursor(),
            depth: self.match_stack.len(),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.restore(checkpoint.cursor);
        self.match_stack.truncate(checkpoint.depth);
    }

    /// Pushes a leaf holding the text between `start` and the cursor.
    pub fn capture(&mut self, start: Cursor, kind: NodeKind) {
        let node = MK_NODE!(
            kind,
            self.lexer.text_since(start),
            Rc::clone(&self.file),
            Span {
                start: start.position(),
                end: self.lexer.position(),
            }
        );
        trace!("captured {} {:?} at {}", kind, node.text, node.span.start);

        self.match_stack.push(node);
    }

    /// Collapses every stack entry above `watermark` into one `kind` node.
    /// With nothing above the watermark the node sits at the cursor.
    pub fn build_match(&mut self, kind: NodeKind, watermark: usize) {
        let children = self.match_stack.split_off(watermark.min(self.match_stack.len()));

        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span {
                start: first.span.start,
                end: last.span.end,
            },
            _ => Span::point(self.lexer.position()),
        };
        debug!("built {} with {} children at {}", kind, children.len(), span.start);

        self.match_stack
            .push(MK_COMPOSITE!(kind, Rc::clone(&self.file), span, children));
    }

    /// A hard error at the cursor.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        self.error_at(error_impl, self.lexer.position())
    }

    pub fn error_at(&self, error_impl: ErrorImpl, position: Position) -> Error {
        Error::new(error_impl, position, Rc::clone(&self.file))
    }

    pub fn incomplete(&self, construct: &'static str) -> Error {
        self.error(ErrorImpl::Incomplete { construct })
    }

    /// A hard error located at the start of the most recently built node.
    pub fn error_at_last(&self, error_impl: ErrorImpl) -> Error {
        let position = self
            .match_stack
            .last()
            .map(|node| node.span.start)
            .unwrap_or_else(|| self.lexer.position());
        self.error_at(error_impl, position)
    }

    /// Skips whitespace, then matches `symbol` exactly.
    pub fn symbol(&mut self, symbol: &str) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        if self.lexer.match_symbol(symbol) {
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    pub fn keyword(&mut self, word: &str) -> bool {
        self.lexer.keyword(word)
    }

    /// Matches a keyword and pushes it as a `kind` leaf.
    pub fn capture_keyword(&mut self, word: &str, kind: NodeKind) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        let start = self.lexer.cursor();
        if self.lexer.keyword(word) {
            self.capture(start, kind);
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    /// Skips whitespace, then matches `symbol` as a guarded operator,
    /// optionally pushing it as a `Str` leaf.
    pub fn match_operator(&mut self, symbol: &str, capture: bool, strict: bool) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        let start = self.lexer.cursor();
        if self.lexer.match_operator(symbol, strict) {
            if capture {
                self.capture(start, NodeKind::Str);
            }
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    /// The first of `symbols` that matches as a captured, guarded operator.
    pub fn match_any_operator(&mut self, symbols: &[&str]) -> bool {
        symbols
            .iter()
            .any(|symbol| self.match_operator(symbol, true, false))
    }

    /// Skips whitespace, then pushes an `Id` leaf.
    pub fn capture_id(&mut self) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        let start = self.lexer.cursor();
        if self.lexer.id() {
            self.capture(start, NodeKind::Id);
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    /// Skips whitespace, then pushes an `Annotation` leaf.
    pub fn annotation(&mut self) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        let start = self.lexer.cursor();
        if self.lexer.annotation() {
            self.capture(start, NodeKind::Annotation);
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    /// A statement separator: an `eol`, or whitespace and comments that
    /// cross a line break.
    pub fn separator(&mut self) -> bool {
        let entry = self.lexer.cursor();
        self.lexer.skip_whitespace();
        if self.lexer.cursor().line > entry.line || self.lexer.eol() {
            true
        } else {
            self.lexer.restore(entry);
            false
        }
    }

    /// Whitespace, comments and line breaks, as allowed inside brackets.
    pub fn skip_newlines(&mut self) {
        self.lexer.skip_newlines();
    }
}

/// Parses `source` with a fresh [`Parser`].
///
/// # Arguments
///
/// * `source` - The complete source text
/// * `file` - The source name used in error messages, or `EVAL_SOURCE`
///
/// # Returns
///
/// The `File` node holding every top-level statement, or the first hard error.
pub fn parse(source: &str, file: &str) -> Result<Node, Error> {
    Parser::new().parse(source, file)
}

/// Shebang, statements, then the whole stack collapsed into one `File`.
pub fn parse_file(parser: &mut Parser) -> Result<Node, Error> {
    parser.lexer().skip_shebang();

    parse_statements(parser)?;

    parser.lexer().skip_whitespace();
    if !parser.lexer().at_eof() {
        return Err(parser.error(ErrorImpl::UnparsedInput));
    }

    parser.build_match(NodeKind::File, 0);
    parser
        .pop()
        .ok_or_else(|| parser.error(ErrorImpl::UnparsedInput))
}

/// Definitions and control flow, which end in a block.
fn parse_definition_like(parser: &mut Parser) -> Result<bool, Error> {
    Ok(parse_def(parser)?
        || parse_if(parser)?
        || parse_while(parser)?
        || parse_for(parser)?
        || parse_try(parser)?)
}

fn parse_expression_like(parser: &mut Parser) -> Result<bool, Error> {
    Ok(parse_return(parser)? || parse_break(parser)? || parse_equation(parser)?)
}

/// A run of statements and separators. Two statements in a row without a
/// separator between them are an error.
///
/// The separator goes first, since statement rules skip comments and would
/// swallow a `//` or `/* */` run that ends the line.
pub fn parse_statements(parser: &mut Parser) -> Result<bool, Error> {
    let mut matched = false;
    let mut saw_eol = true;

    loop {
        if parser.separator() {
            saw_eol = true;
        } else if parse_definition_like(parser)? {
            if !saw_eol {
                return Err(parser.error_at_last(ErrorImpl::DefinitionsMissingSeparator));
            }
            saw_eol = false;
        } else if parse_expression_like(parser)? {
            if !saw_eol {
                return Err(parser.error_at_last(ErrorImpl::ExpressionsMissingSeparator));
            }
            saw_eol = false;
        } else {
            break;
        }
        matched = true;
    }

    Ok(matched)
}
