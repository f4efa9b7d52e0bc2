//! Per-row evaluation of a planned query.
//!
//! Evaluation is pure: the tree is never mutated, and a problem with one
//! row (a field that does not parse under its column type, a row shorter
//! than the schema) is logged and counts as a non-match for that row only.
//! Both join children are always evaluated before combining, so every
//! malformed field in a row gets reported, not just the first.

use rust_decimal::Decimal;

use crate::error::QueryError;
use crate::lexer;
use crate::parser;
use crate::planner;
use crate::query::{CompareOp, ExprNode, Relation};
use crate::schema::{ColumnType, Schema};
use crate::validator;

/// Runs the full pipeline on a query: tokenize, group, validate against
/// the schema, and build the expression tree.
pub fn plan(query: &str, schema: &Schema) -> Result<ExprNode, QueryError> {
    let tokens = lexer::tokenize(query)?;
    let groups = parser::group(tokens)?;
    validator::validate(&groups, schema)?;
    planner::build_tree(groups)
}

/// Plans `query` once and evaluates it against every row, returning the
/// 0-based indices of the rows that match.
///
/// Pipeline errors abort the whole search. Per-row evaluation failures do
/// not: the row counts as a non-match and the scan continues.
///
/// ```
/// use petrel::schema::{Column, ColumnType, Schema};
///
/// let schema = Schema::new(vec![
///     Column::new("age", ColumnType::Integer),
///     Column::new("name", ColumnType::String),
/// ]).unwrap();
/// let rows = vec![
///     vec!["15".to_string(), "bob".to_string()],
///     vec!["5".to_string(), "bob".to_string()],
/// ];
///
/// let matches = petrel::search("age > 10 && name == 'bob'", &schema, &rows).unwrap();
/// assert_eq!(matches, vec![0]);
/// ```
pub fn search(query: &str, schema: &Schema, rows: &[Vec<String>]) -> Result<Vec<usize>, QueryError> {
    let tree = plan(query, schema)?;
    Ok(rows
        .iter()
        .enumerate()
        .filter(|(_, row)| evaluate(&tree, schema, row))
        .map(|(index, _)| index)
        .collect())
}

/// Evaluates a planned tree against one row's field values.
pub fn evaluate(tree: &ExprNode, schema: &Schema, row: &[String]) -> bool {
    match tree {
        ExprNode::Leaf(relation) => evaluate_relation(relation, schema, row),
        ExprNode::And(left, right) => {
            let left = evaluate(left, schema, row);
            let right = evaluate(right, schema, row);
            left && right
        }
        ExprNode::Or(left, right) => {
            let left = evaluate(left, schema, row);
            let right = evaluate(right, schema, row);
            left || right
        }
    }
}

fn evaluate_relation(relation: &Relation, schema: &Schema, row: &[String]) -> bool {
    let Some(index) = schema.column_index(&relation.column.text) else {
        tracing::warn!(
            column = %relation.column.text,
            "relation names a column the schema does not have, treating as non-match"
        );
        return false;
    };
    let Some(field) = row.get(index) else {
        tracing::warn!(
            column = %relation.column.text,
            index,
            "row is shorter than the schema, treating as non-match"
        );
        return false;
    };
    let Some(op) = CompareOp::parse(&relation.operator.text) else {
        tracing::warn!(
            operator = %relation.operator.text,
            "unknown comparison operator, treating as non-match"
        );
        return false;
    };
    let literal = relation.literal.text.as_str();

    match schema.columns()[index].column_type {
        ColumnType::Integer => compare_integers(field, literal, op),
        ColumnType::Double => compare_doubles(field, literal, op),
        ColumnType::Boolean => compare_booleans(field, literal, op),
        ColumnType::String => compare_strings(field, literal, op),
    }
}

fn apply<T: PartialOrd>(op: CompareOp, left: T, right: T) -> bool {
    match op {
        CompareOp::Equal => left == right,
        CompareOp::NotEqual => left != right,
        CompareOp::LessThan => left < right,
        CompareOp::GreaterThan => left > right,
        CompareOp::LessEqual => left <= right,
        CompareOp::GreaterEqual => left >= right,
    }
}

fn compare_integers(field: &str, literal: &str, op: CompareOp) -> bool {
    let row_value: i64 = match field.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(%field, "row value does not parse as an integer, treating as non-match");
            return false;
        }
    };
    let literal_value: i64 = match literal.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(%literal, "comparison value does not parse as an integer, treating as non-match");
            return false;
        }
    };
    apply(op, row_value, literal_value)
}

/// Doubles compare exactly through `Decimal` when both sides fit, so
/// `0.10` equals `0.1`; values outside decimal range or syntax fall back
/// to `f64`.
fn compare_doubles(field: &str, literal: &str, op: CompareOp) -> bool {
    if let (Ok(row_value), Ok(literal_value)) = (field.parse::<Decimal>(), literal.parse::<Decimal>()) {
        return apply(op, row_value, literal_value);
    }
    match (field.parse::<f64>(), literal.parse::<f64>()) {
        (Ok(row_value), Ok(literal_value)) => apply(op, row_value, literal_value),
        _ => {
            tracing::warn!(%field, %literal, "values do not parse as doubles, treating as non-match");
            false
        }
    }
}

fn compare_booleans(field: &str, literal: &str, op: CompareOp) -> bool {
    let row_value = field.to_uppercase();
    if row_value != "T" && row_value != "F" {
        tracing::warn!(%field, "row value is not T or F, treating as non-match");
        return false;
    }
    let literal_value = literal.to_uppercase();
    if literal_value != "T" && literal_value != "F" {
        tracing::warn!(%literal, "comparison value is not T or F, treating as non-match");
        return false;
    }
    match op {
        CompareOp::Equal => row_value == literal_value,
        CompareOp::NotEqual => row_value != literal_value,
        _ => {
            tracing::warn!(?op, "operator does not apply to booleans, treating as non-match");
            false
        }
    }
}

fn compare_strings(field: &str, literal: &str, op: CompareOp) -> bool {
    match op {
        CompareOp::Equal => field == literal,
        CompareOp::NotEqual => field != literal,
        _ => {
            tracing::warn!(?op, "operator does not apply to strings, treating as non-match");
            false
        }
    }
}
