//! Rendering of schemas, records, and search results.
//!
//! Two formats, both driven by the schema so field order is deterministic:
//! plain text for interactive use, and `serde_json` documents for the
//! `--json` mode. JSON fields are typed by their column: an integer or
//! double column becomes a JSON number when the stored text parses, a
//! boolean column becomes `true`/`false`, and anything that does not parse
//! is preserved as the raw string rather than dropped.

use serde_json::{json, Value};

use crate::schema::{Column, ColumnType, Schema};
use crate::store::Table;

/// Text listing of a table's columns and record count:
///
/// ```text
/// Number of columns: 2
/// 0 :: age -- integer
/// 1 :: name -- string
/// Number of records: 3
/// ```
pub fn header_text(table: &Table) -> String {
    let mut out = format!("Number of columns: {}\n", table.schema.len());
    for (index, column) in table.schema.columns().iter().enumerate() {
        out.push_str(&format!(
            "{} :: {} -- {}\n",
            index, column.name, column.column_type
        ));
    }
    out.push_str(&format!("Number of records: {}\n", table.rows.len()));
    out
}

/// Text listing of one record, `name (type): value` per line.
pub fn record_text(schema: &Schema, row: &[String]) -> String {
    let mut out = String::new();
    for (column, value) in schema.columns().iter().zip(row) {
        out.push_str(&format!(
            "{} ({}): {}\n",
            column.name, column.column_type, value
        ));
    }
    out
}

/// Text listing of matching record ids, one `Found match:` line each.
pub fn matches_text(matches: &[usize]) -> String {
    let mut out = String::new();
    for row_id in matches {
        out.push_str(&format!("Found match: {}\n", row_id));
    }
    out
}

/// One field as a typed JSON value.
pub fn field_to_json(column: &Column, value: &str) -> Value {
    match column.column_type {
        ColumnType::Integer => match value.parse::<i64>() {
            Ok(parsed) => json!(parsed),
            Err(_) => json!(value),
        },
        ColumnType::Double => match value.parse::<f64>() {
            Ok(parsed) => json!(parsed),
            Err(_) => json!(value),
        },
        ColumnType::Boolean => match value.to_uppercase().as_str() {
            "T" => json!(true),
            "F" => json!(false),
            _ => json!(value),
        },
        ColumnType::String => json!(value),
    }
}

/// One record as a JSON array of typed values, in schema order.
pub fn row_to_json(schema: &Schema, row: &[String]) -> Value {
    Value::Array(
        schema
            .columns()
            .iter()
            .zip(row)
            .map(|(column, value)| field_to_json(column, value))
            .collect(),
    )
}

/// A table's columns and record count as a JSON document.
pub fn header_to_json(table: &Table) -> Value {
    let columns: Vec<Value> = table
        .schema
        .columns()
        .iter()
        .map(|column| {
            json!({
                "name": column.name,
                "type": column.column_type.to_string(),
            })
        })
        .collect();

    json!({
        "columns": columns,
        "records": table.rows.len(),
    })
}

/// Search results as a JSON document: the matching ids, the typed rows,
/// and a count.
pub fn matches_to_json(table: &Table, matches: &[usize]) -> Value {
    let rows: Vec<Value> = matches
        .iter()
        .filter_map(|&row_id| table.rows.get(row_id))
        .map(|row| row_to_json(&table.schema, row))
        .collect();

    json!({
        "matches": matches,
        "rows": rows,
        "count": matches.len(),
    })
}

#[test]
fn test_field_typing() {
    let age = Column::new("age", ColumnType::Integer);
    assert_eq!(field_to_json(&age, "15"), json!(15));
    assert_eq!(field_to_json(&age, "fifteen"), json!("fifteen"));

    let active = Column::new("active", ColumnType::Boolean);
    assert_eq!(field_to_json(&active, "t"), json!(true));
    assert_eq!(field_to_json(&active, "F"), json!(false));
    assert_eq!(field_to_json(&active, "yes"), json!("yes"));
}

#[test]
fn test_row_order_follows_schema() {
    let schema = Schema::new(vec![
        Column::new("age", ColumnType::Integer),
        Column::new("name", ColumnType::String),
    ])
    .unwrap();
    let row = vec!["15".to_string(), "bob".to_string()];
    assert_eq!(row_to_json(&schema, &row), json!([15, "bob"]));
}
