//! Turns a validated group sequence into an expression tree.
//!
//! The grammar is two precedence levels: `&`/`&&` binds tighter than
//! `|`/`||`, and both fold left, so `a | b & c | d` plans as
//! `((a || (b && c)) || d)`.

use crate::error::QueryError;
use crate::query::{ExprNode, JoinOp, RelationGroup};

struct Planner {
    groups: Vec<RelationGroup>,
    position: usize,
}

/// Builds the expression tree for a validated group sequence.
///
/// `TreeFull` here means the sequence was never validated (or the validator
/// let something through); it is an internal fault, not user input error.
pub fn build_tree(groups: Vec<RelationGroup>) -> Result<ExprNode, QueryError> {
    let mut planner = Planner {
        groups,
        position: 0,
    };
    let tree = planner.parse_or()?;
    if planner.position < planner.groups.len() {
        return Err(QueryError::TreeFull {
            index: planner.position,
        });
    }
    Ok(tree)
}

impl Planner {
    fn take(&mut self) -> Option<RelationGroup> {
        let group = self.groups.get(self.position).cloned()?;
        self.position += 1;
        Some(group)
    }

    /// Whether the next group is a join resolving to `want`. An
    /// unresolvable join spelling is an error rather than a non-match, so
    /// it cannot be silently skipped.
    fn next_is(&self, want: JoinOp) -> Result<bool, QueryError> {
        match self.groups.get(self.position) {
            Some(RelationGroup::Join(token)) => match JoinOp::parse(&token.text) {
                Some(op) => Ok(op == want),
                None => Err(QueryError::UnknownJoinOperator {
                    value: token.text.clone(),
                }),
            },
            _ => Ok(false),
        }
    }

    fn parse_or(&mut self) -> Result<ExprNode, QueryError> {
        let mut left = self.parse_and()?;

        while self.next_is(JoinOp::Or)? {
            self.position += 1;
            let right = self.parse_and()?;
            left = ExprNode::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExprNode, QueryError> {
        let mut left = self.parse_leaf()?;

        while self.next_is(JoinOp::And)? {
            self.position += 1;
            let right = self.parse_leaf()?;
            left = ExprNode::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_leaf(&mut self) -> Result<ExprNode, QueryError> {
        match self.take() {
            Some(RelationGroup::Relation(relation)) => Ok(ExprNode::Leaf(relation)),
            Some(RelationGroup::Join(_)) => Err(QueryError::TreeFull {
                index: self.position - 1,
            }),
            None => Err(QueryError::TreeFull {
                index: self.position,
            }),
        }
    }
}
