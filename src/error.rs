//! Error types shared across the query pipeline and the table store.
//!
//! Query errors are fatal to the whole query: no stage produces partial
//! output. Per-row evaluation problems are not errors at all; they are
//! logged and the row counts as a non-match.

use std::fmt;
use std::io;

use crate::query::{GroupKind, TokenKind};
use crate::schema::ColumnType;

/// Errors from tokenizing, grouping, validating, or planning a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A string literal ran past the end of the query without a closing quote
    UnterminatedString { start: usize },

    /// A character matching no token class
    UnknownCharacter { ch: char, position: usize },

    /// A token of the wrong kind while assembling a relation, or tokens ran
    /// out mid-relation (`found` is `None`)
    MalformedRelation {
        position: usize,
        expected: &'static str,
        found: Option<TokenKind>,
    },

    /// The group sequence is empty, starts with a join, or ends with one
    LeadingOrTrailingJoin,

    /// Two neighboring groups of the same kind
    AdjacentSameKind { index: usize, kind: GroupKind },

    /// A join token outside `&`, `&&`, `|`, `||`
    UnknownJoinOperator { value: String },

    /// A relation names a column the schema does not have
    UnknownColumn { name: String },

    /// An operator that cannot compare against a number literal
    NumberOperatorMismatch { operator: String },

    /// A number literal compared against a boolean or string column
    ColumnNotNumeric {
        column: String,
        column_type: ColumnType,
    },

    /// An operator that cannot compare against a word or string literal
    StringOperatorMismatch { operator: String },

    /// A word or string literal compared against a numeric column
    ColumnNotComparable {
        column: String,
        column_type: ColumnType,
    },

    /// A boolean column compared against something other than `T`/`F`
    InvalidBooleanLiteral { literal: String },

    /// The planner could not place a group; signals a validator/planner
    /// inconsistency, not bad user input
    TreeFull { index: usize },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnterminatedString { start } => {
                write!(f, "Unterminated string literal starting at position {}", start)
            }
            QueryError::UnknownCharacter { ch, position } => {
                write!(f, "Unknown character `{}` at position {}", ch, position)
            }
            QueryError::MalformedRelation {
                position,
                expected,
                found,
            } => match found {
                Some(kind) => write!(
                    f,
                    "Malformed relation at position {}: expected {}, found {}",
                    position, expected, kind
                ),
                None => write!(
                    f,
                    "Malformed relation at position {}: expected {}, found end of query",
                    position, expected
                ),
            },
            QueryError::LeadingOrTrailingJoin => {
                write!(f, "A filter cannot be empty, begin with a join, or end with one")
            }
            QueryError::AdjacentSameKind { index, kind } => {
                write!(f, "Adjacent {} groups at positions {} and {}", kind, index, index + 1)
            }
            QueryError::UnknownJoinOperator { value } => {
                write!(f, "Unknown join operator: `{}`", value)
            }
            QueryError::UnknownColumn { name } => {
                write!(f, "Unknown column: `{}`", name)
            }
            QueryError::NumberOperatorMismatch { operator } => {
                write!(f, "Unknown operator for numbers: `{}`", operator)
            }
            QueryError::ColumnNotNumeric {
                column,
                column_type,
            } => {
                write!(
                    f,
                    "Column `{}` has type {}; a number literal needs an integer or double column",
                    column, column_type
                )
            }
            QueryError::StringOperatorMismatch { operator } => {
                write!(f, "Unknown operator for strings: `{}`", operator)
            }
            QueryError::ColumnNotComparable {
                column,
                column_type,
            } => {
                write!(
                    f,
                    "Column `{}` has type {}; words and strings compare only against boolean or string columns",
                    column, column_type
                )
            }
            QueryError::InvalidBooleanLiteral { literal } => {
                write!(f, "Boolean comparison value must be T or F, got `{}`", literal)
            }
            QueryError::TreeFull { index } => {
                write!(f, "Expression tree cannot place group {}", index)
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors from reading, writing, or mutating a table file.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying filesystem failure
    Io(io::Error),

    /// `create` refuses to overwrite an existing file
    TableExists { path: String },

    /// The file has no header line
    MissingHeader,

    /// The header line does not start with `[` and end with `]`
    MissingHeaderBracket { found: Option<char> },

    /// The header's column count cell is not an integer
    BadColumnCount { value: String },

    /// The header's column count disagrees with the cells present
    ColumnCountMismatch { header: usize, found: usize },

    /// The header's record count cell is not an integer
    BadRecordCount { value: String },

    /// A header cell that is not a `name:code` pair
    BadColumnSpec { index: usize, cell: String },

    /// A header cell with a type code outside `1..=4`
    BadColumnType { index: usize, code: String },

    /// Two columns share a name
    DuplicateColumn { name: String },

    /// A created column name that the query language could never reference
    InvalidColumnName { name: String },

    /// A record line without its surrounding braces
    MalformedRow { line: usize },

    /// A record line whose field count disagrees with the schema
    FieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A record id past the end of the table
    RowOutOfBounds { row_id: usize, records: usize },

    /// An inserted value that does not parse under its column's type
    ValueTypeMismatch {
        column: String,
        column_type: ColumnType,
        value: String,
    },

    /// An inserted string value containing a file-format delimiter
    InvalidStringValue { value: String },

    /// An inserted record with the wrong number of values
    ArityMismatch { expected: usize, found: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "IO error: {}", err),
            StoreError::TableExists { path } => {
                write!(f, "File `{}` already exists; refusing to overwrite", path)
            }
            StoreError::MissingHeader => write!(f, "Malformed file: no header line"),
            StoreError::MissingHeaderBracket { found } => match found {
                Some(ch) => write!(
                    f,
                    "Malformed file: expected bracketed header, found `{}`",
                    ch
                ),
                None => write!(f, "Malformed file: expected bracketed header"),
            },
            StoreError::BadColumnCount { value } => {
                write!(f, "Malformed header: cannot parse column count `{}`", value)
            }
            StoreError::ColumnCountMismatch { header, found } => {
                write!(
                    f,
                    "Malformed header: column count {} does not match the {} columns present",
                    header, found
                )
            }
            StoreError::BadRecordCount { value } => {
                write!(f, "Malformed header: cannot parse record count `{}`", value)
            }
            StoreError::BadColumnSpec { index, cell } => {
                write!(
                    f,
                    "Malformed header: column {} is not a name:type pair: `{}`",
                    index, cell
                )
            }
            StoreError::BadColumnType { index, code } => {
                write!(
                    f,
                    "Malformed header: column {} has type code `{}`, expected 1 through 4",
                    index, code
                )
            }
            StoreError::DuplicateColumn { name } => {
                write!(f, "Duplicate column name: `{}`", name)
            }
            StoreError::InvalidColumnName { name } => {
                write!(
                    f,
                    "Invalid column name `{}`: use letters, digits, `_` or `-`, not starting with a digit",
                    name
                )
            }
            StoreError::MalformedRow { line } => {
                write!(f, "Malformed record at line {}: missing braces", line)
            }
            StoreError::FieldCountMismatch {
                line,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Malformed record at line {}: have {} fields, expected {}",
                    line, found, expected
                )
            }
            StoreError::RowOutOfBounds { row_id, records } => {
                write!(
                    f,
                    "Record id {} out of bounds; table only has {} records",
                    row_id, records
                )
            }
            StoreError::ValueTypeMismatch {
                column,
                column_type,
                value,
            } => {
                write!(
                    f,
                    "Value `{}` does not parse as {} for column `{}`",
                    value, column_type, column
                )
            }
            StoreError::InvalidStringValue { value } => {
                write!(
                    f,
                    "Invalid character in string value `{}`: '|', '{{' and '}}' are reserved",
                    value
                )
            }
            StoreError::ArityMismatch { expected, found } => {
                write!(
                    f,
                    "Record has {} values but the table has {} columns",
                    found, expected
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}
