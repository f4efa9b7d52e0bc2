use std::fmt;

use super::tokens::Token;

/// One `column operator literal` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Bareword token naming a schema column.
    pub column: Token,
    /// Operator token; checked against the column's type during validation.
    pub operator: Token,
    /// Bareword, string, or number token compared against the row field.
    pub literal: Token,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column.text, self.operator.text, self.literal.text
        )
    }
}

/// A grouped unit of tokens: a full relation or a lone join.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationGroup {
    Relation(Relation),
    Join(Token),
}

impl RelationGroup {
    pub fn kind(&self) -> GroupKind {
        match self {
            RelationGroup::Relation(_) => GroupKind::Relation,
            RelationGroup::Join(_) => GroupKind::Join,
        }
    }
}

/// Group kinds, used for adjacency checks and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Relation,
    Join,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::Relation => "relation",
            GroupKind::Join => "join",
        };
        write!(f, "{}", name)
    }
}
