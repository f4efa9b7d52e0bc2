// Validator tests
//
// Placement rules over the group sequence, then schema-aware checks on
// each relation. The first violation in check order is the one reported.

use petrel::{group, tokenize, validate, Column, ColumnType, GroupKind, QueryError, Schema};

fn schema() -> Schema {
    Schema::new(vec![
        Column::new("age", ColumnType::Integer),
        Column::new("score", ColumnType::Double),
        Column::new("alive", ColumnType::Boolean),
        Column::new("name", ColumnType::String),
    ])
    .unwrap()
}

fn check(query: &str) -> Result<(), QueryError> {
    let groups = group(tokenize(query).unwrap()).unwrap();
    validate(&groups, &schema())
}

fn check_err(query: &str) -> QueryError {
    check(query).unwrap_err()
}

// ============================================================================
// Accepted queries
// ============================================================================

#[test]
fn test_valid_queries() {
    let queries = vec![
        "age > 10",
        "age = 10",
        "age == 10",
        "age != 10",
        "score <= 9.75",
        "score >= .5",
        "alive == T",
        "alive != f",
        "alive == 'T'",
        "name == 'bob'",
        "name != bob",
        "name == 'two words'",
        "age > 10 && name == 'bob'",
        "age > 10 & age < 20 | alive == T",
        "name == 'bob' || name == 'alice' || name == 'eve'",
    ];
    for query in queries {
        assert!(check(query).is_ok(), "query should validate: {}", query);
    }
}

// ============================================================================
// Placement rules
// ============================================================================

#[test]
fn test_empty_sequence_rejected() {
    assert_eq!(check_err(""), QueryError::LeadingOrTrailingJoin);
}

#[test]
fn test_leading_join_rejected() {
    assert_eq!(check_err("&& age > 10"), QueryError::LeadingOrTrailingJoin);
}

#[test]
fn test_trailing_join_rejected() {
    assert_eq!(check_err("age > 10 |"), QueryError::LeadingOrTrailingJoin);
    // A join on its own is leading and trailing at once.
    assert_eq!(check_err("&&"), QueryError::LeadingOrTrailingJoin);
}

#[test]
fn test_adjacent_relations_rejected() {
    assert_eq!(
        check_err("age > 10 name == 'bob'"),
        QueryError::AdjacentSameKind {
            index: 0,
            kind: GroupKind::Relation,
        }
    );
}

#[test]
fn test_adjacent_joins_rejected() {
    // Two join tokens separated by whitespace are two groups.
    assert_eq!(
        check_err("age > 10 && || name == 'bob'"),
        QueryError::AdjacentSameKind {
            index: 1,
            kind: GroupKind::Join,
        }
    );
}

#[test]
fn test_fused_join_run_is_one_unknown_operator() {
    // With no whitespace the join characters lex as one token, so this is
    // an operator-spelling fault rather than an adjacency fault.
    assert_eq!(
        check_err("age > 10 &&|| name == 'bob'"),
        QueryError::UnknownJoinOperator {
            value: "&&||".to_string(),
        }
    );
    assert_eq!(
        check_err("age > 10 &&& name == 'bob'"),
        QueryError::UnknownJoinOperator {
            value: "&&&".to_string(),
        }
    );
}

// ============================================================================
// Relation checks against the schema
// ============================================================================

#[test]
fn test_unknown_column() {
    assert_eq!(
        check_err("height > 10"),
        QueryError::UnknownColumn {
            name: "height".to_string(),
        }
    );
}

#[test]
fn test_number_needs_a_real_operator() {
    assert_eq!(
        check_err("age => 10"),
        QueryError::NumberOperatorMismatch {
            operator: "=>".to_string(),
        }
    );
}

#[test]
fn test_number_needs_a_numeric_column() {
    assert_eq!(
        check_err("name > 10"),
        QueryError::ColumnNotNumeric {
            column: "name".to_string(),
            column_type: ColumnType::String,
        }
    );
    assert_eq!(
        check_err("alive == 1"),
        QueryError::ColumnNotNumeric {
            column: "alive".to_string(),
            column_type: ColumnType::Boolean,
        }
    );
}

#[test]
fn test_words_and_strings_compare_by_equality_only() {
    assert_eq!(
        check_err("name > 'bob'"),
        QueryError::StringOperatorMismatch {
            operator: ">".to_string(),
        }
    );
    assert_eq!(
        check_err("name =! 'bob'"),
        QueryError::StringOperatorMismatch {
            operator: "=!".to_string(),
        }
    );
}

#[test]
fn test_words_and_strings_need_boolean_or_string_columns() {
    assert_eq!(
        check_err("age == bob"),
        QueryError::ColumnNotComparable {
            column: "age".to_string(),
            column_type: ColumnType::Integer,
        }
    );
    assert_eq!(
        check_err("score == 'bob'"),
        QueryError::ColumnNotComparable {
            column: "score".to_string(),
            column_type: ColumnType::Double,
        }
    );
}

#[test]
fn test_negative_number_is_a_word() {
    // `-` is a bareword character, so `-1` reaches the validator as a word
    // literal and cannot compare against an integer column.
    assert_eq!(
        check_err("age == -1"),
        QueryError::ColumnNotComparable {
            column: "age".to_string(),
            column_type: ColumnType::Integer,
        }
    );
}

#[test]
fn test_boolean_literals_are_t_or_f() {
    assert_eq!(
        check_err("alive == yes"),
        QueryError::InvalidBooleanLiteral {
            literal: "yes".to_string(),
        }
    );
    assert_eq!(
        check_err("alive == 'yes'"),
        QueryError::InvalidBooleanLiteral {
            literal: "yes".to_string(),
        }
    );
}

// ============================================================================
// Check order
// ============================================================================

#[test]
fn test_placement_beats_relation_checks() {
    // The adjacency fault is reported even though the first relation also
    // names an unknown column.
    assert_eq!(
        check_err("height > 10 && && age > 10"),
        QueryError::AdjacentSameKind {
            index: 1,
            kind: GroupKind::Join,
        }
    );
}

#[test]
fn test_relation_checks_run_left_to_right() {
    assert_eq!(
        check_err("score > 'x' || height > 1"),
        QueryError::StringOperatorMismatch {
            operator: ">".to_string(),
        }
    );
    assert_eq!(
        check_err("height > 1 || score > 'x'"),
        QueryError::UnknownColumn {
            name: "height".to_string(),
        }
    );
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn test_error_message_wording() {
    let cases = vec![
        ("", "cannot be empty"),
        ("age > 10 name == 'bob'", "Adjacent relation groups"),
        ("age > 10 &&& age < 20", "Unknown join operator: `&&&`"),
        ("height > 10", "Unknown column: `height`"),
        ("age => 10", "Unknown operator for numbers: `=>`"),
        ("name > 10", "Column `name` has type string"),
        ("name > 'bob'", "Unknown operator for strings: `>`"),
        ("age == bob", "Column `age` has type integer"),
        ("alive == yes", "must be T or F, got `yes`"),
    ];
    for (query, fragment) in cases {
        let message = check_err(query).to_string();
        assert!(
            message.contains(fragment),
            "message for `{}` should contain `{}`, got `{}`",
            query,
            fragment,
            message
        );
    }
}
