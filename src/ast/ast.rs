use std::{fmt::Display, rc::Rc};

use crate::{Position, Span};

/// Node Kinds
///
/// The closed catalog of everything the parser can produce, leaves and
/// composites alike.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Error,
    Int,
    Float,
    Id,
    Char,
    Str,
    Eol,
    FunCall,
    InplaceFunCall,
    ArgList,
    Variable,
    Equation,
    VarDecl,
    Expression,
    Comparison,
    Additive,
    Multiplicative,
    Negate,
    Not,
    ArrayCall,
    DotAccess,
    QuotedString,
    SingleQuotedString,
    Lambda,
    Block,
    Def,
    While,
    If,
    For,
    InlineArray,
    InlineMap,
    Return,
    File,
    Prefix,
    Break,
    MapPair,
    ValueRange,
    InlineRange,
    Annotation,
    Try,
    Catch,
    Finally,
    Method,
    AttrDecl,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Error => "Internal Parser Error",
            NodeKind::Int => "Int",
            NodeKind::Float => "Float",
            NodeKind::Id => "Id",
            NodeKind::Char => "Char",
            NodeKind::Str => "Str",
            NodeKind::Eol => "Eol",
            NodeKind::FunCall => "Fun_Call",
            NodeKind::InplaceFunCall => "Inplace_Fun_Call",
            NodeKind::ArgList => "Arg_List",
            NodeKind::Variable => "Variable",
            NodeKind::Equation => "Equation",
            NodeKind::VarDecl => "Var_Decl",
            NodeKind::Expression => "Expression",
            NodeKind::Comparison => "Comparison",
            NodeKind::Additive => "Additive",
            NodeKind::Multiplicative => "Multiplicative",
            NodeKind::Negate => "Negate",
            NodeKind::Not => "Not",
            NodeKind::ArrayCall => "Array_Call",
            NodeKind::DotAccess => "Dot_Access",
            NodeKind::QuotedString => "Quoted_String",
            NodeKind::SingleQuotedString => "Single_Quoted_String",
            NodeKind::Lambda => "Lambda",
            NodeKind::Block => "Block",
            NodeKind::Def => "Def",
            NodeKind::While => "While",
            NodeKind::If => "If",
            NodeKind::For => "For",
            NodeKind::InlineArray => "Inline_Array",
            NodeKind::InlineMap => "Inline_Map",
            NodeKind::Return => "Return",
            NodeKind::File => "File",
            NodeKind::Prefix => "Prefix",
            NodeKind::Break => "Break",
            NodeKind::MapPair => "Map_Pair",
            NodeKind::ValueRange => "Value_Range",
            NodeKind::InlineRange => "Inline_Range",
            NodeKind::Annotation => "Annotation",
            NodeKind::Try => "Try",
            NodeKind::Catch => "Catch",
            NodeKind::Finally => "Finally",
            NodeKind::Method => "Method",
            NodeKind::AttrDecl => "Attr_Decl",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The single tree element: a matched leaf (`text` holds the source slice)
/// or a composite assembled from the leaves and composites it owns.
///
/// `annotation` is only set on `Def` and `Method` nodes; the annotation is
/// attached to the definition, it is never one of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
    pub file: Rc<String>,
    pub span: Span,
    pub children: Vec<Node>,
    pub annotation: Option<Box<Node>>,
}

impl Node {
    pub fn start(&self) -> Position {
        self.span.start
    }

    pub fn end(&self) -> Position {
        self.span.end
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.text.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_kinds(&self) -> Vec<NodeKind> {
        self.children.iter().map(|child| child.kind).collect()
    }

    /// Depth-first pre-order walk over this node and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Value of an `Int` leaf, accepting decimal, `0x` and `0b` forms.
    pub fn int_value(&self) -> Option<i64> {
        if self.kind != NodeKind::Int {
            return None;
        }

        let text = self.text.as_str();
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).ok()
        } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
            i64::from_str_radix(bin, 2).ok()
        } else {
            text.parse().ok()
        }
    }

    pub fn float_value(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Float => self.text.parse().ok(),
            _ => None,
        }
    }

    /// Decoded contents of a quoted leaf, with the quotes stripped and the
    /// escape sequences resolved.
    pub fn string_value(&self) -> Option<String> {
        if !matches!(self.kind, NodeKind::QuotedString | NodeKind::SingleQuotedString) {
            return None;
        }

        let mut chars = self.text.chars();
        chars.next();
        chars.next_back();

        Some(unescape(chars.as_str()))
    }

    /// Renders the tree one node per line, children indented by two spaces.
    pub fn pretty_print(&self) -> String {
        let mut result = String::new();
        self.pretty_print_into(&mut result, 0);
        result
    }

    fn pretty_print_into(&self, result: &mut String, indent: usize) {
        result.push_str(&"  ".repeat(indent));
        result.push_str(self.kind.name());
        if !self.text.is_empty() {
            result.push_str(&format!(" {:?}", self.text));
        }
        result.push_str(&format!(" {}-{}", self.span.start, self.span.end));
        if let Some(annotation) = &self.annotation {
            result.push_str(&format!(" @{:?}", annotation.text.trim_end()));
        }
        result.push('\n');

        for child in &self.children {
            child.pretty_print_into(result, indent + 1);
        }
    }
}

/// S-expression rendering: leaves print their text, composites print
/// `(Kind child ...)`.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.children.is_empty() && !self.text.is_empty() {
            return write!(f, "{}", self.text.trim_end());
        }

        write!(f, "({}", self.kind)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('\'') => {
                result.push('\'');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                chars.next();
                let mut hex = String::new();

                for _ in 0..2 {
                    match chars.peek() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            hex.push(*ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            Some(_) => result.push(ch), // Keep the backslash
            None => result.push(ch),    // Keep the lone backslash
        }
    }

    result
}
