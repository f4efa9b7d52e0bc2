//! Columns and schemas.
//!
//! A schema is an ordered list of uniquely named, typed columns; the order
//! defines the positional alignment with row fields. Rows themselves stay
//! plain strings, and the column type decides how a field is parsed at the
//! moment it is compared or inserted.

use std::fmt;

use crate::error::StoreError;

/// Column value types.
///
/// The numeric codes used by the table file format exist only at the store
/// boundary, through [ColumnType::code] and [ColumnType::from_code].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Double,
    Boolean,
    String,
}

impl ColumnType {
    /// File-format code for this type.
    pub fn code(self) -> u8 {
        match self {
            ColumnType::Integer => 1,
            ColumnType::Double => 2,
            ColumnType::Boolean => 3,
            ColumnType::String => 4,
        }
    }

    /// Reverses [ColumnType::code]. `None` outside `1..=4`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ColumnType::Integer),
            2 => Some(ColumnType::Double),
            3 => Some(ColumnType::Boolean),
            4 => Some(ColumnType::String),
            _ => None,
        }
    }

    /// Parses a user-facing spelling: a type name or a file-format code.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "integer" | "1" => Some(ColumnType::Integer),
            "double" | "2" => Some(ColumnType::Double),
            "boolean" | "3" => Some(ColumnType::Boolean),
            "string" | "4" => Some(ColumnType::String),
            _ => None,
        }
    }

    /// Integer and double columns order numerically; boolean and string
    /// columns support only equality.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Double => "double",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
        };
        write!(f, "{}", name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
        }
    }
}

/// An ordered set of uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<Column>) -> Result<Self, StoreError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(StoreError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }
        Ok(Schema { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the named column, if it exists.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}
