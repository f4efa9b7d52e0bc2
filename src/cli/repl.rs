//! Interactive shell.
//!
//! The only mode with prompting flows: `create` with no inline specs asks
//! for attributes one at a time, `insert` with no inline values asks per
//! column, and `display`/`delete` with an unparsable record id ask for it
//! again. History lives in memory for the session only.

use rustyline::config::{Config, EditMode};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::schema::{Column, ColumnType, Schema};
use crate::store::{self, Table};

use super::commands::{parse_command, Command, Flow, Session, HELP};
use super::CliError;

const PROMPT: &str = "petrel> ";
const NAME_PROMPT: &str = "Attribute name> ";
const TYPE_PROMPT: &str =
    "Valid attribute types:\n 1) Integer ;; 2) Double ;; 3) Boolean ;; 4) String\n\nType> ";
const MORE_PROMPT: &str = "Additional attribute (y/n)> ";
const ROW_ID_PROMPT: &str = "rid> ";

/// Runs the interactive loop until `quit`, `exit`, or Ctrl-D.
///
/// Ctrl-C at the main prompt clears the line; Ctrl-C inside a prompting
/// flow cancels just that command. Errors are printed and the loop keeps
/// going.
pub fn run_repl(session: &Session) -> Result<(), CliError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .edit_mode(EditMode::Emacs)
        .build();
    let mut editor = DefaultEditor::with_config(config)?;

    if !session.quiet {
        println!(
            "petrel {} -- type `help` for commands, `quit` to leave",
            env!("CARGO_PKG_VERSION")
        );
    }

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        match run_interactive(session, &mut editor, line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(CliError::Readline(ReadlineError::Interrupted)) => println!("Cancelled"),
            Err(CliError::Readline(ReadlineError::Eof)) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                if matches!(e, CliError::Usage(_)) {
                    print!("{}", HELP);
                }
            }
        }
    }

    Ok(())
}

/// Parses one line, fills in whatever the line left out by prompting, and
/// executes the result.
fn run_interactive(
    session: &Session,
    editor: &mut DefaultEditor,
    line: &str,
) -> Result<Flow, CliError> {
    let mut command = parse_command(line)?;

    match &mut command {
        Command::Quit => return Ok(Flow::Quit),
        Command::Create { columns, .. } if columns.is_none() => {
            *columns = Some(prompt_columns(editor)?);
        }
        Command::Insert { path, values } if values.is_none() => {
            // Prompting is per column, so the schema has to load up front.
            let table = Table::load(path.as_str())?;
            *values = Some(prompt_values(editor, &table.schema)?);
        }
        Command::Display { row_id, .. } | Command::Delete { row_id, .. } if row_id.is_none() => {
            *row_id = Some(prompt_row_id(editor)?);
        }
        _ => {}
    }

    session.execute(command)?;
    Ok(Flow::Continue)
}

/// Attribute-by-attribute schema flow: name, type, then whether another
/// attribute follows. Bad answers re-ask the same question.
fn prompt_columns(editor: &mut DefaultEditor) -> Result<Vec<Column>, CliError> {
    let mut columns: Vec<Column> = Vec::new();

    loop {
        let name = loop {
            let name = editor.readline(NAME_PROMPT)?.trim().to_string();
            if !store::is_valid_column_name(&name) {
                println!(
                    "Invalid attribute name `{}`. Names use letters, digits, `_`, and `-`, and cannot start with a digit.",
                    name
                );
                continue;
            }
            if columns.iter().any(|c| c.name == name) {
                println!("Name already in use; please specify another.");
                continue;
            }
            break name;
        };

        let column_type = loop {
            let answer = editor.readline(TYPE_PROMPT)?;
            match ColumnType::parse(&answer) {
                Some(column_type) => break column_type,
                None => println!("Invalid attribute type. Must be a type name or a code, [1...4]."),
            }
        };

        columns.push(Column::new(name, column_type));

        loop {
            match editor.readline(MORE_PROMPT)?.trim().to_lowercase().as_str() {
                "y" => break,
                "n" => return Ok(columns),
                _ => println!("Must be either y or n."),
            }
        }
    }
}

/// Per-column value flow for `insert`, re-asking until the value fits the
/// column type.
fn prompt_values(editor: &mut DefaultEditor, schema: &Schema) -> Result<Vec<String>, CliError> {
    let mut values = Vec::with_capacity(schema.len());

    for column in schema.columns() {
        let prompt = format!("{} ({})> ", column.name, column.column_type);
        loop {
            let raw = editor.readline(&prompt)?;
            match store::check_value(column, raw.trim()) {
                Ok(value) => {
                    values.push(value);
                    break;
                }
                Err(e) => println!("{}", e),
            }
        }
    }

    Ok(values)
}

fn prompt_row_id(editor: &mut DefaultEditor) -> Result<usize, CliError> {
    loop {
        let raw = editor.readline(ROW_ID_PROMPT)?;
        match raw.trim().parse::<usize>() {
            Ok(row_id) => return Ok(row_id),
            Err(_) => println!("Invalid row id. Must be a non-negative integer."),
        }
    }
}
