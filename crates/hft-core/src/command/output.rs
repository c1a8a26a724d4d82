use std::fmt;

/// Message shown to the operator after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Success(String),
    Error(String),
}

impl CommandOutput {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandOutput::Success(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandOutput::Error(msg.into())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutput::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            CommandOutput::Success(m) | CommandOutput::Error(m) => m,
        }
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
