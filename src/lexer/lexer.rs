use crate::{ast::ast::NodeKind, Position};

use super::tokens::{
    is_id_char, MULTILINE_COMMENT, NUMBER_PATTERNS, OPERATOR_GUARD, SINGLELINE_COMMENT,
};

/// The scanning state that backtracking saves and restores as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset into the source
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Cursor {
    pub fn start() -> Self {
        Cursor {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Outcome of scanning a delimited literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    NoMatch,
    Matched,
    /// The opening delimiter matched but the input ended first.
    Unterminated,
}

/// A cursor over one source text plus the lexical primitives of the grammar.
///
/// Every primitive either succeeds and advances, or fails and leaves the
/// cursor where it was. Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    cursor: Cursor,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            source: String::from(source),
            cursor: Cursor::start(),
        }
    }

    /// Replaces the input and rewinds to line 1, column 1.
    pub fn reset(&mut self, source: &str) {
        self.source.clear();
        self.source.push_str(source);
        self.cursor = Cursor::start();
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn at_eof(&self) -> bool {
        self.cursor.offset >= self.source.len()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.cursor.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Source text between `from` and the current cursor.
    pub fn text_since(&self, from: Cursor) -> String {
        String::from(&self.source[from.offset..self.cursor.offset])
    }

    /// Consumes one character on the current line.
    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.cursor.offset += ch.len_utf8();
            self.cursor.column += 1;
        }
    }

    /// Consumes `n` characters on the current line.
    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn match_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn match_symbol(&mut self, symbol: &str) -> bool {
        if self.remainder().starts_with(symbol) {
            self.advance_n(symbol.chars().count());
            true
        } else {
            false
        }
    }

    /// A line terminator: `\r\n` or `\n`.
    pub fn newline(&mut self) -> bool {
        if self.match_symbol("\r\n") || self.match_char('\n') {
            self.cursor.line += 1;
            self.cursor.column = 1;
            true
        } else {
            false
        }
    }

    /// A statement boundary: a line terminator or `;`.
    pub fn eol(&mut self) -> bool {
        self.newline() || self.match_char(';')
    }

    /// Consumes spaces, tabs and comments. Newlines only go by when they are
    /// inside a comment.
    pub fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while !self.at_eof() {
            if self.match_char(' ') || self.match_char('\t') || self.skip_comments() {
                skipped = true;
            } else {
                break;
            }
        }
        skipped
    }

    /// An unterminated `/*` comment runs to the end of input and still counts
    /// as a comment.
    pub fn skip_comments(&mut self) -> bool {
        if self.match_symbol(MULTILINE_COMMENT.0) {
            while !self.at_eof() {
                if self.match_symbol(MULTILINE_COMMENT.1) {
                    break;
                } else if !self.newline() {
                    self.advance();
                }
            }
            true
        } else if self.match_symbol(SINGLELINE_COMMENT) {
            while !self.at_eof() {
                if self.newline() {
                    break;
                }
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// Whitespace, comments and line terminators, for the inside of brackets.
    pub fn skip_newlines(&mut self) -> bool {
        let mut skipped = false;
        loop {
            let whitespace = self.skip_whitespace();
            let newline = self.newline();
            if !whitespace && !newline {
                break;
            }
            skipped = true;
        }
        skipped
    }

    /// Matches `symbol` as an operator. Unless `strict`, the match is
    /// rejected when the next character could extend it into a longer
    /// operator.
    pub fn match_operator(&mut self, symbol: &str, strict: bool) -> bool {
        let entry = self.cursor;
        if !self.match_symbol(symbol) {
            return false;
        }

        if !strict {
            if let Some(next) = self.peek() {
                if OPERATOR_GUARD.contains(&next) {
                    self.cursor = entry;
                    return false;
                }
            }
        }

        true
    }

    /// One or more identifier characters. A leading digit is accepted.
    pub fn id(&mut self) -> bool {
        let mut matched = false;
        while let Some(ch) = self.peek() {
            if !is_id_char(ch) {
                break;
            }
            self.advance();
            matched = true;
        }
        matched
    }

    /// Matches `word` when it is not the start of a longer identifier.
    pub fn keyword(&mut self, word: &str) -> bool {
        let entry = self.cursor;
        self.skip_whitespace();

        if self.match_symbol(word) {
            match self.peek() {
                Some(ch) if is_id_char(ch) => {}
                _ => return true,
            }
        }

        self.cursor = entry;
        false
    }

    /// One or more consecutive lines introduced by `#`, each consumed through
    /// its terminating `eol`.
    pub fn annotation(&mut self) -> bool {
        if self.peek() != Some('#') {
            return false;
        }

        while self.peek() == Some('#') {
            while self.match_char('#') {}

            while !self.at_eof() {
                if self.eol() {
                    break;
                }
                self.advance();
            }
        }
        true
    }

    /// Skips a leading `#!` line. Only meaningful at the very start of input.
    pub fn skip_shebang(&mut self) -> bool {
        if self.cursor.offset != 0 || !self.remainder().starts_with("#!") {
            return false;
        }

        while !self.at_eof() {
            if self.newline() {
                break;
            }
            self.advance();
        }
        true
    }

    /// A number literal not directly followed by an identifier character.
    pub fn number(&mut self) -> Option<NodeKind> {
        let matched = NUMBER_PATTERNS.iter().find_map(|(regex, kind)| {
            regex
                .find(self.remainder())
                .map(|found| (found.end(), *kind))
        });

        let (len, kind) = matched?;
        if self.remainder()[len..].chars().next().is_some_and(is_id_char) {
            return None;
        }

        // The patterns are ASCII only, so bytes and characters agree.
        self.advance_n(len);
        Some(kind)
    }

    /// A literal delimited by `quote` with backslash escapes. On
    /// `Scan::Unterminated` the cursor is left at the end of input.
    pub fn quoted(&mut self, quote: char) -> Scan {
        if !self.match_char(quote) {
            return Scan::NoMatch;
        }

        while !self.at_eof() {
            if self.match_char('\\') {
                if !self.newline() {
                    self.advance();
                }
            } else if self.match_char(quote) {
                return Scan::Matched;
            } else if !self.newline() {
                self.advance();
            }
        }
        Scan::Unterminated
    }
}
