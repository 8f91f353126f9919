//! Utility macros for the parser.
//!
//! - `MK_NODE!` - Creates a leaf Node instance
//! - `MK_COMPOSITE!` - Creates a Node that owns already built children
//!
//! These macros keep the node literals in the tree builder short.

/// Creates a leaf Node instance.
///
/// # Arguments
///
/// * `$kind` - The NodeKind
/// * `$text` - The matched source text
/// * `$file` - The `Rc<String>` source name
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let node = MK_NODE!(NodeKind::Id, String::from("x"), Rc::clone(&file), span);
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($kind:expr, $text:expr, $file:expr, $span:expr) => {
        $crate::ast::ast::Node {
            kind: $kind,
            text: $text,
            file: $file,
            span: $span,
            children: Vec::new(),
            annotation: None,
        }
    };
}

/// Creates a composite Node instance with empty text.
///
/// # Example
///
/// ```ignore
/// let node = MK_COMPOSITE!(NodeKind::Additive, Rc::clone(&file), span, children);
/// ```
#[macro_export]
macro_rules! MK_COMPOSITE {
    ($kind:expr, $file:expr, $span:expr, $children:expr) => {
        $crate::ast::ast::Node {
            kind: $kind,
            text: String::new(),
            file: $file,
            span: $span,
            children: $children,
            annotation: None,
        }
    };
}
