//! Operator command surface.
//!
//! ```text
//! create        <name> <text> <dimid> <x> <y> <z>
//! createdynamic <name> <text> <dimid> <x> <y> <z> <interval>
//! edit          <name> <text>
//! delete        <name>
//! reload
//! ```
//!
//! A leading `hft` or `/hft` is accepted and ignored. Command words are
//! case-insensitive; see [`tokenize`] for quoting.
mod error;
pub use error::CommandError;

mod output;
pub use output::CommandOutput;

mod tokenize;
pub use tokenize::tokenize;

use std::{fmt, str::FromStr};

use tracing::{debug, warn};

use hft_model::{DimensionId, LabelDefinition, Position};

use crate::{error::LabelError, orchestrator::Orchestrator, store::Persistence};

pub const MSG_CREATED: &str = "Floating text created.";
pub const MSG_CREATED_DYNAMIC: &str = "Dynamic floating text created.";
pub const MSG_UPDATED: &str = "Floating text updated.";
pub const MSG_DELETED: &str = "Floating text deleted.";
pub const MSG_RELOADED: &str = "All floating texts have been reloaded.";
pub const MSG_ALREADY_EXISTS: &str = "Floating text with this name already exists.";
pub const MSG_NOT_FOUND: &str = "Floating text with this name does not exist.";

pub const USAGE: &str = "\
usage:
  create <name> <text> <dimid> <x> <y> <z>
  createdynamic <name> <text> <dimid> <x> <y> <z> <interval>
  edit <name> <text>
  delete <name>
  reload";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create {
        name: String,
        text: String,
        dimension: DimensionId,
        position: Position,
    },
    CreateDynamic {
        name: String,
        text: String,
        dimension: DimensionId,
        position: Position,
        interval_ms: i64,
    },
    Edit {
        name: String,
        text: String,
    },
    Delete {
        name: String,
    },
    Reload,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::CreateDynamic { .. } => "createdynamic",
            Command::Edit { .. } => "edit",
            Command::Delete { .. } => "delete",
            Command::Reload => "reload",
        }
    }

    /// Run the command and turn the result into an operator message.
    pub async fn execute(self, orch: &Orchestrator) -> CommandOutput {
        debug!(command = self.verb(), "executing operator command");
        match self {
            Command::Create {
                name,
                text,
                dimension,
                position,
            } => {
                let def = LabelDefinition::new_static(text, position, dimension);
                reply(orch.create(&name, def).await, MSG_CREATED)
            }
            Command::CreateDynamic {
                name,
                text,
                dimension,
                position,
                interval_ms,
            } => {
                let def = LabelDefinition::new_dynamic(text, position, dimension, Some(interval_ms));
                reply(orch.create(&name, def).await, MSG_CREATED_DYNAMIC)
            }
            Command::Edit { name, text } => reply(orch.edit(&name, text).await, MSG_UPDATED),
            Command::Delete { name } => reply(orch.delete(&name).await, MSG_DELETED),
            Command::Reload => match orch.reload().await {
                Ok(_) => CommandOutput::success(MSG_RELOADED),
                Err(e) => {
                    warn!(error = %e, "reload failed");
                    CommandOutput::error(format!("Failed to reload floating texts: {e}"))
                }
            },
        }
    }
}

/// Parse and run one operator line.
pub async fn run_line(orch: &Orchestrator, line: &str) -> CommandOutput {
    match line.parse::<Command>() {
        Ok(cmd) => cmd.execute(orch).await,
        Err(e) => CommandOutput::error(format!("{e}\n{USAGE}")),
    }
}

fn reply(result: Result<Persistence, LabelError>, success: &str) -> CommandOutput {
    match result {
        Ok(Persistence::Saved) => CommandOutput::success(success),
        Ok(Persistence::Failed(e)) => {
            CommandOutput::success(format!("{success} Warning: changes could not be saved: {e}"))
        }
        Err(LabelError::AlreadyExists(_)) => CommandOutput::error(MSG_ALREADY_EXISTS),
        Err(LabelError::NotFound(_)) => CommandOutput::error(MSG_NOT_FOUND),
        Err(LabelError::Render(e)) => {
            CommandOutput::error(format!("Floating text saved but could not be displayed: {e}"))
        }
        Err(e) => CommandOutput::error(e.to_string()),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line)?;
        let mut args = Args::new(tokens);

        let mut verb = args.next().ok_or(CommandError::Empty)?;
        if verb.eq_ignore_ascii_case("hft") || verb.eq_ignore_ascii_case("/hft") {
            verb = args.next().ok_or(CommandError::Empty)?;
        }

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "create" => Command::Create {
                name: args.required("name")?,
                text: args.required("text")?,
                dimension: DimensionId::new(args.number("dimid")?),
                position: args.position()?,
            },
            "createdynamic" => Command::CreateDynamic {
                name: args.required("name")?,
                text: args.required("text")?,
                dimension: DimensionId::new(args.number("dimid")?),
                position: args.position()?,
                interval_ms: args.number("interval")?,
            },
            "edit" => Command::Edit {
                name: args.required("name")?,
                text: args.required("text")?,
            },
            "delete" => Command::Delete {
                name: args.required("name")?,
            },
            "reload" => Command::Reload,
            _ => return Err(CommandError::UnknownCommand(verb)),
        };
        args.finish()?;
        Ok(cmd)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Create { name, .. }
            | Command::CreateDynamic { name, .. }
            | Command::Edit { name, .. }
            | Command::Delete { name } => write!(f, "{} {name}", self.verb()),
            Command::Reload => f.write_str(self.verb()),
        }
    }
}

struct Args(std::vec::IntoIter<String>);

impl Args {
    fn new(tokens: Vec<String>) -> Self {
        Self(tokens.into_iter())
    }

    fn next(&mut self) -> Option<String> {
        self.0.next()
    }

    fn required(&mut self, arg: &'static str) -> Result<String, CommandError> {
        self.next().ok_or(CommandError::MissingArgument(arg))
    }

    fn number<T: FromStr>(&mut self, arg: &'static str) -> Result<T, CommandError> {
        let value = self.required(arg)?;
        value
            .trim()
            .parse()
            .map_err(|_| CommandError::InvalidNumber { arg, value })
    }

    fn position(&mut self) -> Result<Position, CommandError> {
        let x = self.number("x")?;
        let y = self.number("y")?;
        let z = self.number("z")?;
        Ok(Position::new(x, y, z))
    }

    fn finish(mut self) -> Result<(), CommandError> {
        match self.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra)),
            None => Ok(()),
        }
    }
}
