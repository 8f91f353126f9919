/// AST (Abstract Syntax Tree) module
/// Contains the node type shared by lexed leaves and assembled composites
///
/// Submodules:
/// - ast: Node, NodeKind and the literal accessors a downstream evaluator uses
pub mod ast;
