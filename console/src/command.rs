//! Line commands accepted by the terminal host.

use spycats_core::DraftField;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list                  reload spy cats from the server
  set <field> <value>   fill the add form (name, years, breed, salary)
  add                   submit the add form
  edit <id>             edit a spy cat's salary
  salary <value>        type the new salary for the row being edited
  confirm               save the edited salary
  cancel                discard the edit
  delete <id>           remove a spy cat (asks first)
  help                  show this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Set { field: DraftField, value: String },
    Add,
    Edit { id: u32 },
    Salary { value: String },
    Confirm,
    Cancel,
    Delete { id: u32 },
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("unknown field '{0}', expected name, years, breed or salary")]
    UnknownField(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a spy cat id")]
    BadId(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "refresh" => Command::List,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                let field = DraftField::parse(field)
                    .ok_or_else(|| CommandError::UnknownField(field.to_string()))?;
                Command::Set {
                    field,
                    value: value.trim().to_string(),
                }
            }
            "add" => Command::Add,
            "edit" => Command::Edit {
                id: parse_id(rest, "edit <id>")?,
            },
            "salary" => Command::Salary {
                value: rest.to_string(),
            },
            "confirm" | "save" => Command::Confirm,
            "cancel" | "discard" => Command::Cancel,
            "delete" | "rm" => Command::Delete {
                id: parse_id(rest, "delete <id>")?,
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_id(text: &str, usage: &'static str) -> Result<u32, CommandError> {
    if text.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    text.parse().map_err(|_| CommandError::BadId(text.to_string()))
}
