use crate::error::{PaperbindError, Result};
use crate::session::Session;

pub mod builtin;

/// What the REPL loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Redisplay the prompt and read the next command.
    Continue,
    /// Consume the next line as a `<key> >>> value` assignment.
    Prompt(String),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Print,
    Course(Option<String>),
    New(Option<String>),
    Scan,
    Save,
    Empty,
    Unknown(String),
}

impl Command {
    /// Split on single spaces; the first token names the command, the
    /// second (when non-empty) is its argument.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split(' ').map(str::trim);
        let name = parts.next().unwrap_or("");
        let arg = parts
            .next()
            .filter(|part| !part.is_empty())
            .map(String::from);

        match name {
            "" => Command::Empty,
            "print" => Command::Print,
            "course" => Command::Course(arg),
            "new" => Command::New(arg),
            "scan" => Command::Scan,
            "save" => Command::Save,
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn execute(&self, session: &mut Session) -> Result<CommandResult> {
        match self {
            Command::Print => builtin::print_command(session),
            Command::Course(arg) => builtin::course_command(session, arg.as_deref()),
            Command::New(arg) => builtin::new_command(session, arg.as_deref()),
            Command::Scan => builtin::scan_command(session),
            Command::Save => builtin::save_command(session),
            Command::Empty => Err(PaperbindError::Command("specify a command".to_string())),
            Command::Unknown(_) => Err(PaperbindError::Command("invalid command".to_string())),
        }
    }
}

/// All commands as strings (for autocomplete)
pub static COMMANDS: &[&str] = &["print", "course", "new", "scan", "save"];
