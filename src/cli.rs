use clap::{CommandFactory, Parser};

use crate::{error::ParseError, util::minutes_to_secs};

/// a small terminal countdown timer
///
/// Only the first flag counts: `tmr -m 25` starts a 25 minute countdown,
/// anything after the flag and its value is ignored.
#[derive(Parser, Debug)]
#[clap(
    name = "tmr",
    about,
    long_about = "A small terminal countdown timer: a big clock, a progress bar, a bell and a burst of confetti when the time is up.",
    after_help = "Examples:\n  tmr --minutes 25\n  tmr -s 90\n\nKeys while running: r restarts, q / Esc / Ctrl-C quits."
)]
pub struct Cli {
    /// count down this many minutes
    #[clap(short = 'm', long, value_name = "N")]
    pub minutes: Option<u32>,

    /// count down this many seconds
    #[clap(short = 's', long, value_name = "N")]
    pub seconds: Option<u32>,

    /// reserved for a future reset command, currently does nothing
    #[clap(short = 'r', long)]
    pub reset: bool,
}

/// Validated result of command-line parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub duration_seconds: u32,
    pub reset_mode: bool,
    pub show_help: bool,
}

impl Config {
    pub fn with_duration(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            ..Self::default()
        }
    }

    fn help() -> Self {
        Self {
            show_help: true,
            ..Self::default()
        }
    }

    fn reset() -> Self {
        Self {
            reset_mode: true,
            ..Self::default()
        }
    }
}

/// Turn the command-line tokens (program name excluded) into a [`Config`].
///
/// Only the leading flag is inspected, together with its value if it takes
/// one. Later tokens are ignored.
pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Config, ParseError> {
    let Some(first) = args.first().map(AsRef::as_ref) else {
        return Err(ParseError::MissingArguments);
    };
    let value = args.get(1).map(AsRef::as_ref);

    match first {
        "--help" | "-h" => Ok(Config::help()),
        "--minutes" | "-m" => {
            let raw = value.ok_or(ParseError::MissingMinutesValue)?;
            let minutes = parse_count(raw, "minutes")?;
            let secs = minutes_to_secs(minutes).ok_or_else(|| overflow(raw, "minutes"))?;
            Ok(Config::with_duration(secs))
        }
        "--seconds" | "-s" => {
            let raw = value.ok_or(ParseError::MissingSecondsValue)?;
            Ok(Config::with_duration(parse_count(raw, "seconds")?))
        }
        "--reset" | "-r" => Ok(Config::reset()),
        other => Err(ParseError::UnknownArgument(other.to_string())),
    }
}

/// Usage text for `--help`, rendered from the [`Cli`] flag table.
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

// Digits only: no sign, no whitespace, no empty string.
fn parse_count(raw: &str, unit: &'static str) -> Result<u32, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber {
            value: raw.to_string(),
        });
    }
    // a digit-only string can only fail by being too large
    raw.parse::<u32>().map_err(|_| overflow(raw, unit))
}

fn overflow(raw: &str, unit: &'static str) -> ParseError {
    ParseError::DurationOverflow {
        value: raw.to_string(),
        unit,
    }
}
