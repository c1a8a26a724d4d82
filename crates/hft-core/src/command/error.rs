use thiserror::Error;

/// Operator input that could not be turned into a [`super::Command`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("invalid number for <{arg}>: '{value}'")]
    InvalidNumber { arg: &'static str, value: String },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}
