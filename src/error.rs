//! Error types for argument parsing and timer misuse

use thiserror::Error;

use crate::timer::TimerState;

/// Errors produced while turning command-line tokens into a [`crate::cli::Config`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no arguments given, expected --minutes <N>, --seconds <N> or --help")]
    MissingArguments,

    #[error("--minutes requires a value")]
    MissingMinutesValue,

    #[error("--seconds requires a value")]
    MissingSecondsValue,

    #[error("'{value}' is not a valid non-negative whole number")]
    InvalidNumber { value: String },

    #[error("{value} {unit} is too long, the total must fit in {max} seconds", max = u32::MAX)]
    DurationOverflow { value: String, unit: &'static str },

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

/// Misuse of the timer engine by its driving loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer can only be started from Idle, it is {state}")]
    NotIdle { state: TimerState },
}
