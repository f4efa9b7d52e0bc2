//! Line-oriented table files.
//!
//! A table file is one header line followed by one line per record:
//!
//! ```text
//! [2][age:1][name:4][3]
//! {15|bob}
//! {5|alice}
//! {22|eve}
//! ```
//!
//! The header carries the column count, one `name:code` cell per column
//! (1 integer, 2 double, 3 boolean, 4 string), and the record count.
//! Record lines are brace-wrapped, pipe-separated field values, which is
//! why string values may not contain `|`, `{`, or `}`.
//!
//! Header faults are fatal on load. A record count that disagrees with the
//! lines actually present is not: the count is advisory, so the mismatch is
//! logged and the lines win. Every write rebuilds the whole file with a
//! corrected count.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QueryError, StoreError};
use crate::evaluator;
use crate::schema::{Column, ColumnType, Schema};

static COLUMN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[A-Za-z_-][A-Za-z0-9_-]*$").expect("column name pattern is valid")
});

/// Whether `name` can ever be referenced by a query: a bareword that does
/// not begin with a digit (a leading digit would tokenize as a number).
pub fn is_valid_column_name(name: &str) -> bool {
    COLUMN_NAME.is_match(name)
}

/// Validates one value for a column and returns the text to store.
/// Booleans normalize to upper case; everything else is stored verbatim.
pub fn check_value(column: &Column, value: &str) -> Result<String, StoreError> {
    match column.column_type {
        ColumnType::Integer => {
            if value.parse::<i64>().is_err() {
                return Err(type_mismatch(column, value));
            }
            Ok(value.to_string())
        }
        ColumnType::Double => {
            if value.parse::<f64>().is_err() {
                return Err(type_mismatch(column, value));
            }
            Ok(value.to_string())
        }
        ColumnType::Boolean => {
            let upper = value.to_uppercase();
            if upper == "T" || upper == "F" {
                Ok(upper)
            } else {
                Err(type_mismatch(column, value))
            }
        }
        ColumnType::String => {
            if value.contains('|') || value.contains('{') || value.contains('}') {
                Err(StoreError::InvalidStringValue {
                    value: value.to_string(),
                })
            } else {
                Ok(value.to_string())
            }
        }
    }
}

fn type_mismatch(column: &Column, value: &str) -> StoreError {
    StoreError::ValueTypeMismatch {
        column: column.name.clone(),
        column_type: column.column_type,
        value: value.to_string(),
    }
}

/// An in-memory table: a schema plus its rows, loaded from and saved to
/// one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Writes an empty table to a new file. Refuses to overwrite, and
    /// rejects column names a query could never reference.
    pub fn create(path: impl AsRef<Path>, schema: Schema) -> Result<Table, StoreError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(StoreError::TableExists {
                path: path.display().to_string(),
            });
        }
        for column in schema.columns() {
            if !is_valid_column_name(&column.name) {
                return Err(StoreError::InvalidColumnName {
                    name: column.name.clone(),
                });
            }
        }

        let table = Table {
            schema,
            rows: Vec::new(),
        };
        table.save(path)?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Table, StoreError> {
        let text = fs::read_to_string(path)?;
        parse_table(&text)
    }

    /// Rewrites the whole file: header (with a corrected record count) and
    /// every record line.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        fs::write(path, self.render())?;
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = format!("[{}]", self.schema.len());
        for column in self.schema.columns() {
            out.push_str(&format!("[{}:{}]", column.name, column.column_type.code()));
        }
        out.push_str(&format!("[{}]\n", self.rows.len()));
        for row in &self.rows {
            out.push_str(&format!("{{{}}}\n", row.join("|")));
        }
        out
    }

    /// Validates and appends one record.
    pub fn insert(&mut self, values: Vec<String>) -> Result<(), StoreError> {
        if values.len() != self.schema.len() {
            return Err(StoreError::ArityMismatch {
                expected: self.schema.len(),
                found: values.len(),
            });
        }
        let mut record = Vec::with_capacity(values.len());
        for (column, value) in self.schema.columns().iter().zip(values) {
            record.push(check_value(column, &value)?);
        }
        self.rows.push(record);
        Ok(())
    }

    /// Removes the record with the given 0-based id.
    pub fn delete(&mut self, row_id: usize) -> Result<(), StoreError> {
        if row_id >= self.rows.len() {
            return Err(StoreError::RowOutOfBounds {
                row_id,
                records: self.rows.len(),
            });
        }
        self.rows.remove(row_id);
        Ok(())
    }

    /// The record with the given 0-based id.
    pub fn row(&self, row_id: usize) -> Result<&[String], StoreError> {
        self.rows
            .get(row_id)
            .map(Vec::as_slice)
            .ok_or(StoreError::RowOutOfBounds {
                row_id,
                records: self.rows.len(),
            })
    }

    /// Runs a filter query over this table's rows.
    pub fn search(&self, query: &str) -> Result<Vec<usize>, QueryError> {
        evaluator::search(query, &self.schema, &self.rows)
    }
}

fn parse_table(text: &str) -> Result<Table, StoreError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(StoreError::MissingHeader)?;
    let (schema, records) = parse_header(header)?;

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        rows.push(parse_row(offset + 1, line, schema.len())?);
    }

    if rows.len() != records {
        tracing::warn!(
            header = records,
            found = rows.len(),
            "record count in header does not match the file, using the records present"
        );
    }

    Ok(Table { schema, rows })
}

fn parse_header(line: &str) -> Result<(Schema, usize), StoreError> {
    if !line.starts_with('[') {
        return Err(StoreError::MissingHeaderBracket {
            found: line.chars().next(),
        });
    }
    if !line.ends_with(']') {
        return Err(StoreError::MissingHeaderBracket {
            found: line.chars().last(),
        });
    }

    let inner = &line[1..line.len() - 1];
    let cells: Vec<&str> = inner.split("][").collect();
    if cells.len() < 2 {
        return Err(StoreError::BadColumnCount {
            value: inner.to_string(),
        });
    }

    let columns: usize = cells[0].parse().map_err(|_| StoreError::BadColumnCount {
        value: cells[0].to_string(),
    })?;
    if cells.len() - 2 != columns {
        return Err(StoreError::ColumnCountMismatch {
            header: columns,
            found: cells.len() - 2,
        });
    }

    let last = cells[cells.len() - 1];
    let records: usize = last.parse().map_err(|_| StoreError::BadRecordCount {
        value: last.to_string(),
    })?;

    let mut parsed = Vec::with_capacity(columns);
    for (index, cell) in cells[1..cells.len() - 1].iter().enumerate() {
        let parts: Vec<&str> = cell.split(':').collect();
        if parts.len() != 2 {
            return Err(StoreError::BadColumnSpec {
                index,
                cell: cell.to_string(),
            });
        }
        let column_type = parts[1]
            .parse::<u8>()
            .ok()
            .and_then(ColumnType::from_code)
            .ok_or_else(|| StoreError::BadColumnType {
                index,
                code: parts[1].to_string(),
            })?;
        parsed.push(Column::new(parts[0], column_type));
    }

    Ok((Schema::new(parsed)?, records))
}

fn parse_row(line: usize, text: &str, columns: usize) -> Result<Vec<String>, StoreError> {
    let inner = text
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or(StoreError::MalformedRow { line })?;

    let fields: Vec<String> = inner.split('|').map(str::to_string).collect();
    if fields.len() != columns {
        return Err(StoreError::FieldCountMismatch {
            line,
            expected: columns,
            found: fields.len(),
        });
    }
    Ok(fields)
}
