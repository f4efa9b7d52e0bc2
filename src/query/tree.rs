use std::fmt;

use super::groups::Relation;

/// Boolean expression tree over relations.
///
/// Built once per query by the planner; join children are always present,
/// so a half-built node cannot be represented. Evaluation never mutates the
/// tree, which makes one tree reusable across any number of rows and
/// shareable across threads.
///
/// `Display` renders the fully parenthesized form, with `&` and `|` joins
/// normalized to their doubled spellings:
///
/// ```text
/// ((age > 10 && age < 20) || name = bob)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// A single relation.
    Leaf(Relation),
    /// Both children must hold.
    And(Box<ExprNode>, Box<ExprNode>),
    /// Either child may hold.
    Or(Box<ExprNode>, Box<ExprNode>),
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Leaf(relation) => write!(f, "{}", relation),
            ExprNode::And(left, right) => write!(f, "({} && {})", left, right),
            ExprNode::Or(left, right) => write!(f, "({} || {})", left, right),
        }
    }
}
