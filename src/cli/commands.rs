//! Command parsing and execution.
//!
//! One command per line, dispatched on a case-insensitive first word:
//!
//! ```text
//! create <file> [name:type ...]
//! header <file>
//! insert <file> [v1|v2|...]
//! display <rid> <file>
//! delete <rid> <file>
//! search "<condition>" <file>
//! help
//! quit | exit
//! ```
//!
//! `create`, `insert`, `display`, and `delete` have interactive prompting
//! flows for their omitted parts; those live in the REPL. One-shot and
//! piped runs require the inline forms.

use std::io::{self, BufRead};

use serde_json::json;

use crate::evaluator;
use crate::output;
use crate::schema::{Column, ColumnType, Schema};
use crate::store::Table;

use super::CliError;

pub const HELP: &str = "\
petrel table commands:

  create <file> [name:type ...]    create a table; prompts for columns when no specs are given
  header <file>                    show a table's columns and record count
  insert <file> [v1|v2|...]        append a record; prompts per column when no values are given
  display <rid> <file>             show one record by its 0-based id
  delete <rid> <file>              delete one record by its 0-based id
  search \"<condition>\" <file>      list records matching a filter condition
  help                             show this help
  quit, exit                       leave

Column types are integer, double, boolean, string (or their codes 1-4).
Conditions compare columns against values, joined with && and ||:

  search \"age > 10 && name == 'bob'\" people.pet
";

/// One parsed command line.
///
/// `None` in an `Option` field means the line omitted that part and the
/// REPL should prompt for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create {
        path: String,
        columns: Option<Vec<Column>>,
    },
    Header {
        path: String,
    },
    Insert {
        path: String,
        values: Option<Vec<String>>,
    },
    Display {
        row_id: Option<usize>,
        path: String,
    },
    Delete {
        row_id: Option<usize>,
        path: String,
    },
    Search {
        query: String,
        path: String,
    },
    Help,
    Quit,
}

/// Parses one non-empty command line.
pub fn parse_command(line: &str) -> Result<Command, CliError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "quit" | "exit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        "create" => parse_create(rest),
        "header" => match single_word(rest) {
            Some(path) => Ok(Command::Header { path }),
            None => Err(usage("header expects a file name: header <file>")),
        },
        "insert" => parse_insert(rest),
        "display" => {
            let (row_id, path) = parse_row_id_and_path(rest, "display")?;
            Ok(Command::Display { row_id, path })
        }
        "delete" => {
            let (row_id, path) = parse_row_id_and_path(rest, "delete")?;
            Ok(Command::Delete { row_id, path })
        }
        "search" => parse_search(line),
        other => Err(usage(&format!("Unknown command `{}`; try `help`", other))),
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage(message.to_string())
}

fn single_word(rest: &str) -> Option<String> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Some(word.to_string()),
        _ => None,
    }
}

fn parse_create(rest: &str) -> Result<Command, CliError> {
    let mut words = rest.split_whitespace();
    let Some(path) = words.next() else {
        return Err(usage(
            "create expects a file name: create <file> [name:type ...]",
        ));
    };

    let specs: Vec<&str> = words.collect();
    let columns = if specs.is_empty() {
        None
    } else {
        let mut columns = Vec::with_capacity(specs.len());
        for spec in specs {
            columns.push(parse_column_spec(spec)?);
        }
        Some(columns)
    };

    Ok(Command::Create {
        path: path.to_string(),
        columns,
    })
}

fn parse_column_spec(spec: &str) -> Result<Column, CliError> {
    let Some((name, type_name)) = spec.split_once(':') else {
        return Err(usage(&format!(
            "column spec `{}` is not a name:type pair",
            spec
        )));
    };
    let Some(column_type) = ColumnType::parse(type_name) else {
        return Err(usage(&format!(
            "unknown column type `{}`: use integer, double, boolean, string, or a code 1-4",
            type_name
        )));
    };
    Ok(Column::new(name, column_type))
}

fn parse_insert(rest: &str) -> Result<Command, CliError> {
    let (path, values) = match rest.split_once(char::is_whitespace) {
        Some((path, values)) => (path, Some(values.trim())),
        None => (rest, None),
    };
    if path.is_empty() {
        return Err(usage(
            "insert expects a file name: insert <file> [v1|v2|...]",
        ));
    }

    Ok(Command::Insert {
        path: path.to_string(),
        values: values.map(|text| text.split('|').map(str::to_string).collect()),
    })
}

fn parse_row_id_and_path(rest: &str, name: &str) -> Result<(Option<usize>, String), CliError> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    if words.len() != 2 {
        return Err(usage(&format!(
            "invalid number of arguments to {}: have {}, expected 2 ({} <rid> <file>)",
            name,
            words.len(),
            name
        )));
    }
    // An unparsable rid is prompted for in the REPL rather than rejected.
    Ok((words[0].parse().ok(), words[1].to_string()))
}

/// The condition keeps its case and spacing, so `search` parses the raw
/// line on its double quotes instead of the whitespace-split words.
fn parse_search(line: &str) -> Result<Command, CliError> {
    let parts: Vec<&str> = line.split('"').collect();
    if parts.len() != 3 {
        return Err(usage(
            "search expects a quoted condition and a file name: search \"<condition>\" <file>",
        ));
    }

    let query = parts[1].trim().to_string();
    let Some(path) = single_word(parts[2]) else {
        return Err(usage("invalid file name after the search condition"));
    };

    Ok(Command::Search { query, path })
}

/// Output configuration for one run of the binary.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub json: bool,
    pub quiet: bool,
}

impl Session {
    pub fn new(json: bool, quiet: bool) -> Self {
        Session { json, quiet }
    }

    /// Runs one parsed command. `Quit` is a no-op here; every caller
    /// intercepts it before executing.
    pub fn execute(&self, command: Command) -> Result<(), CliError> {
        match command {
            Command::Create { path, columns } => self.create(&path, columns),
            Command::Header { path } => self.header(&path),
            Command::Insert { path, values } => self.insert(&path, values),
            Command::Display { row_id, path } => self.display(row_id, &path),
            Command::Delete { row_id, path } => self.delete(row_id, &path),
            Command::Search { query, path } => self.search(&query, &path),
            Command::Help => {
                print!("{}", HELP);
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn create(&self, path: &str, columns: Option<Vec<Column>>) -> Result<(), CliError> {
        let Some(columns) = columns else {
            return Err(usage(
                "create needs inline column specs (name:type) when not running interactively",
            ));
        };
        let schema = Schema::new(columns)?;
        let table = Table::create(path, schema)?;

        if self.json {
            println!("{}", json!({ "created": path, "columns": table.schema.len() }));
        } else if !self.quiet {
            println!("Created table `{}` with {} columns", path, table.schema.len());
        }
        Ok(())
    }

    fn header(&self, path: &str) -> Result<(), CliError> {
        let table = Table::load(path)?;
        if self.json {
            println!("{}", output::header_to_json(&table));
        } else {
            print!("{}", output::header_text(&table));
        }
        Ok(())
    }

    fn insert(&self, path: &str, values: Option<Vec<String>>) -> Result<(), CliError> {
        let Some(values) = values else {
            return Err(usage(
                "insert needs an inline value string (v1|v2|...) when not running interactively",
            ));
        };
        let mut table = Table::load(path)?;
        table.insert(values)?;
        table.save(path)?;

        let row_id = table.rows.len() - 1;
        if self.json {
            println!("{}", json!({ "inserted": row_id, "records": table.rows.len() }));
        } else if !self.quiet {
            println!("Inserted record {} into `{}`", row_id, path);
        }
        Ok(())
    }

    fn display(&self, row_id: Option<usize>, path: &str) -> Result<(), CliError> {
        let row_id = require_row_id(row_id)?;
        let table = Table::load(path)?;
        let row = table.row(row_id)?;

        if self.json {
            let values = output::row_to_json(&table.schema, row);
            println!("{}", json!({ "id": row_id, "values": values }));
        } else {
            print!("{}", output::record_text(&table.schema, row));
        }
        Ok(())
    }

    fn delete(&self, row_id: Option<usize>, path: &str) -> Result<(), CliError> {
        let row_id = require_row_id(row_id)?;
        let mut table = Table::load(path)?;
        table.delete(row_id)?;
        table.save(path)?;

        if self.json {
            println!("{}", json!({ "deleted": row_id, "records": table.rows.len() }));
        } else if !self.quiet {
            println!("Deleted record {} from `{}`", row_id, path);
        }
        Ok(())
    }

    fn search(&self, query: &str, path: &str) -> Result<(), CliError> {
        let table = Table::load(path)?;
        let tree = evaluator::plan(query, &table.schema)?;
        let matches: Vec<usize> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| evaluator::evaluate(&tree, &table.schema, row))
            .map(|(row_id, _)| row_id)
            .collect();

        if self.json {
            println!("{}", output::matches_to_json(&table, &matches));
        } else {
            if !self.quiet {
                println!("{}", tree);
            }
            print!("{}", output::matches_text(&matches));
        }
        Ok(())
    }
}

fn require_row_id(row_id: Option<usize>) -> Result<usize, CliError> {
    row_id.ok_or_else(|| {
        usage("the record id must be a non-negative integer when not running interactively")
    })
}

/// Whether the caller's command loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parses and runs one command line. Empty lines are ignored.
pub fn run_line(session: &Session, line: &str) -> Result<Flow, CliError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Flow::Continue);
    }
    let command = parse_command(line)?;
    if matches!(command, Command::Quit) {
        return Ok(Flow::Quit);
    }
    session.execute(command)?;
    Ok(Flow::Continue)
}

/// Runs every line arriving on stdin, for piped use. Lines starting with
/// `#` are skipped; a failing line is reported and the rest still run.
pub fn run_piped(session: &Session) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match run_line(session, trimmed) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    Ok(())
}

#[test]
fn test_parse_create_with_specs() {
    let command = parse_command("create people.pet age:integer name:string").unwrap();
    assert_eq!(
        command,
        Command::Create {
            path: "people.pet".to_string(),
            columns: Some(vec![
                Column::new("age", ColumnType::Integer),
                Column::new("name", ColumnType::String),
            ]),
        }
    );

    // Numeric type codes are accepted too.
    let command = parse_command("create people.pet age:1").unwrap();
    assert_eq!(
        command,
        Command::Create {
            path: "people.pet".to_string(),
            columns: Some(vec![Column::new("age", ColumnType::Integer)]),
        }
    );
}

#[test]
fn test_parse_search_keeps_condition_case() {
    let command = parse_command("SEARCH \"name == 'Bob'\" people.pet").unwrap();
    assert_eq!(
        command,
        Command::Search {
            query: "name == 'Bob'".to_string(),
            path: "people.pet".to_string(),
        }
    );
}

#[test]
fn test_parse_insert_value_string() {
    let command = parse_command("insert people.pet 15|bob smith|T").unwrap();
    assert_eq!(
        command,
        Command::Insert {
            path: "people.pet".to_string(),
            values: Some(vec![
                "15".to_string(),
                "bob smith".to_string(),
                "T".to_string(),
            ]),
        }
    );
}
