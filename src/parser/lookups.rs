use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::ast::NodeKind;

/// Precedence levels of the expression grammar, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Assignment,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Member,
    Primary,
}

impl BindingPower {
    /// The next tighter level.
    pub fn tighter(self) -> BindingPower {
        match self {
            BindingPower::Assignment => BindingPower::Logical,
            BindingPower::Logical => BindingPower::Relational,
            BindingPower::Relational => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Member,
            BindingPower::Member | BindingPower::Primary => BindingPower::Primary,
        }
    }
}

/// One left-associative binary level of the chain.
#[derive(Debug)]
pub struct OperatorLevel {
    /// Kind of the composite built when at least one operator matched
    pub kind: NodeKind,
    /// Operators of this level; longer spellings come before their prefixes
    pub operators: &'static [&'static str],
    /// Completes the "Incomplete ..." message when an operand is missing
    pub construct: &'static str,
}

/// Assignment is right-associative and handled on its own.
pub const ASSIGNMENT_OPERATORS: &[&str] = &[":=", "+=", "-=", "*=", "/=", "="];

pub const PREFIX_OPERATORS: &[&str] = &["++", "--"];

lazy_static! {
    pub static ref LEVEL_LOOKUP: HashMap<BindingPower, OperatorLevel> = {
        let mut map = HashMap::new();
        map.insert(BindingPower::Logical, OperatorLevel {
            kind: NodeKind::Expression,
            operators: &["&&", "||"],
            construct: "expression",
        });
        map.insert(BindingPower::Relational, OperatorLevel {
            kind: NodeKind::Comparison,
            operators: &[">=", "<=", "==", "!=", ">", "<"],
            construct: "comparison expression",
        });
        map.insert(BindingPower::Additive, OperatorLevel {
            kind: NodeKind::Additive,
            operators: &["+", "-"],
            construct: "additive expression",
        });
        map.insert(BindingPower::Multiplicative, OperatorLevel {
            kind: NodeKind::Multiplicative,
            operators: &["*", "/", "%"],
            construct: "multiplicative expression",
        });
        map.insert(BindingPower::Member, OperatorLevel {
            kind: NodeKind::DotAccess,
            operators: &["."],
            construct: "dot access expression",
        });
        map
    };
}
