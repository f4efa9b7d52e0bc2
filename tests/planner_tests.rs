// Planner tests
//
// Tree shapes from validated group sequences, checked through the
// parenthesized Display form: AND binds tighter than OR, both fold left.

use petrel::{build_tree, group, plan, tokenize, Column, ColumnType, ExprNode, QueryError, Schema};

fn tree(query: &str) -> ExprNode {
    build_tree(group(tokenize(query).unwrap()).unwrap()).unwrap()
}

fn shape(query: &str) -> String {
    tree(query).to_string()
}

#[test]
fn test_single_relation_has_no_parens() {
    assert_eq!(shape("age > 10"), "age > 10");
}

#[test]
fn test_and_folds_left() {
    assert_eq!(
        shape("age > 10 && age < 20 && age != 15"),
        "((age > 10 && age < 20) && age != 15)"
    );
}

#[test]
fn test_or_folds_left() {
    assert_eq!(
        shape("age > 10 || age < 5 || age == 7"),
        "((age > 10 || age < 5) || age == 7)"
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        shape("a = 1 | b = 2 & c = 3"),
        "(a = 1 || (b = 2 && c = 3))"
    );
    assert_eq!(
        shape("age > 10 || age < 5 && alive == T"),
        "(age > 10 || (age < 5 && alive == T))"
    );
    assert_eq!(
        shape("a = 1 | b = 2 & c = 3 | d = 4"),
        "((a = 1 || (b = 2 && c = 3)) || d = 4)"
    );
}

#[test]
fn test_single_char_joins_normalize_in_display() {
    // `&`/`|` and their doubled spellings build the same node; Display
    // always renders the doubled form. Comparison operators keep their
    // source spelling.
    assert_eq!(shape("age > 10 & alive == T"), "(age > 10 && alive == T)");
    assert_eq!(shape("age = 10 | age = 20"), "(age = 10 || age = 20)");
}

#[test]
fn test_structure_not_just_rendering() {
    let tree = tree("age > 10 && age < 20 || alive == T");
    let ExprNode::Or(left, right) = tree else {
        panic!("expected an Or at the root");
    };
    let ExprNode::And(and_left, and_right) = *left else {
        panic!("expected an And on the left");
    };
    assert!(matches!(*and_left, ExprNode::Leaf(_)));
    assert!(matches!(*and_right, ExprNode::Leaf(_)));
    let ExprNode::Leaf(relation) = *right else {
        panic!("expected a Leaf on the right");
    };
    assert_eq!(relation.column.text, "alive");
}

#[test]
fn test_unresolvable_join_is_an_error() {
    // The validator catches this first in the normal pipeline; the builder
    // re-checks rather than skipping the group.
    let groups = group(tokenize("age > 10 &&& age < 20").unwrap()).unwrap();
    assert_eq!(
        build_tree(groups).unwrap_err(),
        QueryError::UnknownJoinOperator {
            value: "&&&".to_string(),
        }
    );
}

#[test]
fn test_unvalidated_sequence_is_an_internal_fault() {
    // Two adjacent relations never reach the builder through the pipeline;
    // fed directly, the leftover group is reported as TreeFull.
    let groups = group(tokenize("age > 10 age < 20").unwrap()).unwrap();
    assert_eq!(
        build_tree(groups).unwrap_err(),
        QueryError::TreeFull { index: 1 }
    );

    // A leading join strands the builder on a non-relation leaf.
    let groups = group(tokenize("&& age > 10").unwrap()).unwrap();
    assert_eq!(
        build_tree(groups).unwrap_err(),
        QueryError::TreeFull { index: 0 }
    );
}

#[test]
fn test_plan_runs_the_whole_pipeline() {
    let schema = Schema::new(vec![
        Column::new("age", ColumnType::Integer),
        Column::new("name", ColumnType::String),
    ])
    .unwrap();

    let tree = plan("age > 10 && name == 'bob'", &schema).unwrap();
    assert_eq!(tree.to_string(), "(age > 10 && name == bob)");

    // plan validates; bare build_tree does not.
    assert_eq!(
        plan("height > 10", &schema).unwrap_err(),
        QueryError::UnknownColumn {
            name: "height".to_string(),
        }
    );
}
