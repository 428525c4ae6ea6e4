//! Extraction of the engine reported duration.
//!
//! For a single test invocation the engine prints a status line first, for
//! example `Test completed in 0.0023s`. The last whitespace separated token of
//! that line is a number followed by a unit.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("engine produced no output")]
    EmptyOutput,

    #[error("first output line has no trailing duration: {line:?}")]
    MissingToken { line: String },

    #[error("unknown duration unit in {token:?}")]
    UnknownUnit { token: String },

    #[error("invalid duration value in {token:?}")]
    InvalidNumber { token: String },
}

/// Parse the duration from the first line of `stdout`.
pub fn parse_first_line(stdout: &str) -> Result<Duration, DurationParseError> {
    let line = stdout
        .lines()
        .next()
        .ok_or(DurationParseError::EmptyOutput)?;
    let token = line
        .split_whitespace()
        .next_back()
        .ok_or_else(|| DurationParseError::MissingToken {
            line: line.to_string(),
        })?;
    parse_token(token).map_err(|err| match err {
        DurationParseError::MissingToken { .. } => DurationParseError::MissingToken {
            line: line.to_string(),
        },
        err => err,
    })
}

/// Parse a single `<number><unit>` token, `s` and `ms` are understood.
pub fn parse_token(token: &str) -> Result<Duration, DurationParseError> {
    let (number, scale) = if let Some(number) = token.strip_suffix("ms") {
        (number, 1e-3)
    } else if let Some(number) = token.strip_suffix('s') {
        (number, 1.0)
    } else if token.ends_with(|c: char| c.is_ascii_digit()) {
        return Err(DurationParseError::UnknownUnit {
            token: token.to_string(),
        });
    } else {
        return Err(DurationParseError::MissingToken {
            line: token.to_string(),
        });
    };

    let invalid = || DurationParseError::InvalidNumber {
        token: token.to_string(),
    };
    let value: f64 = number.parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(value * scale).map_err(|_| invalid())
}
