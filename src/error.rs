use std::io;

use thiserror::Error;

use crate::runner::ExitState;

/// Conditions that stop a run before any test is executed.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Error collecting tests ({state}):\n{stderr}")]
    Discovery { state: ExitState, stderr: String },

    #[error("invalid test id pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No tests found!")]
    NoTests,

    #[error("No tests left to run, all {discovered} discovered tests were filtered out")]
    NothingSelected { discovered: usize },
}
