//! Schema-aware validation of a grouped query.
//!
//! Checks run in a fixed order so the reported violation is deterministic:
//!
//! 1. the sequence is non-empty and neither starts nor ends with a join;
//! 2. no two neighboring groups share a kind;
//! 3. one left-to-right pass over the groups, checking each join's spelling
//!    and each relation's column, operator, and literal.
//!
//! The first violation found is returned; nothing accumulates. A query that
//! validates cleanly cannot fail to plan, and its relations can only fail
//! per row (a field that does not parse), never structurally.

use crate::error::QueryError;
use crate::query::{CompareOp, GroupKind, JoinOp, Relation, RelationGroup, TokenKind};
use crate::schema::{ColumnType, Schema};

pub fn validate(groups: &[RelationGroup], schema: &Schema) -> Result<(), QueryError> {
    match (groups.first(), groups.last()) {
        (Some(first), Some(last))
            if first.kind() != GroupKind::Join && last.kind() != GroupKind::Join => {}
        _ => return Err(QueryError::LeadingOrTrailingJoin),
    }

    for (index, pair) in groups.windows(2).enumerate() {
        if pair[0].kind() == pair[1].kind() {
            return Err(QueryError::AdjacentSameKind {
                index,
                kind: pair[0].kind(),
            });
        }
    }

    for group in groups {
        match group {
            RelationGroup::Join(token) => {
                if JoinOp::parse(&token.text).is_none() {
                    return Err(QueryError::UnknownJoinOperator {
                        value: token.text.clone(),
                    });
                }
            }
            RelationGroup::Relation(relation) => validate_relation(relation, schema)?,
        }
    }

    Ok(())
}

fn validate_relation(relation: &Relation, schema: &Schema) -> Result<(), QueryError> {
    let index = schema
        .column_index(&relation.column.text)
        .ok_or_else(|| QueryError::UnknownColumn {
            name: relation.column.text.clone(),
        })?;
    let column = &schema.columns()[index];
    let op = CompareOp::parse(&relation.operator.text);

    if relation.literal.kind == TokenKind::Number {
        if op.is_none() {
            return Err(QueryError::NumberOperatorMismatch {
                operator: relation.operator.text.clone(),
            });
        }
        if !column.column_type.is_numeric() {
            return Err(QueryError::ColumnNotNumeric {
                column: column.name.clone(),
                column_type: column.column_type,
            });
        }
    } else {
        if !op.is_some_and(CompareOp::is_equality) {
            return Err(QueryError::StringOperatorMismatch {
                operator: relation.operator.text.clone(),
            });
        }
        if column.column_type.is_numeric() {
            return Err(QueryError::ColumnNotComparable {
                column: column.name.clone(),
                column_type: column.column_type,
            });
        }
        if column.column_type == ColumnType::Boolean {
            let upper = relation.literal.text.to_uppercase();
            if upper != "T" && upper != "F" {
                return Err(QueryError::InvalidBooleanLiteral {
                    literal: relation.literal.text.clone(),
                });
            }
        }
    }

    Ok(())
}
