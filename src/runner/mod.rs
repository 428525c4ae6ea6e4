//! Process execution for ranktest.
//!
//! Every engine call, discovery included, goes through a [`ProcessRunner`].
//! A runner starts exactly one process per call, waits for it to finish (or
//! kills it once the timeout passed) and hands back everything it wrote.
//! Nothing is shared between two calls, which is what keeps tests isolated
//! from each other.
//!
//! [`SystemRunner`] spawns real processes. Tests swap in a scripted runner to
//! exercise the harness without an engine.

use std::{fmt::Display, io, time::Duration};

mod isolated;
pub use isolated::*;

mod system;
pub use system::*;

/// A program together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    /// The process exited on its own, `None` if a signal ended it.
    Exited(Option<i32>),
    /// The process was killed after exceeding its timeout.
    TimedOut,
}

impl ExitState {
    pub fn success(&self) -> bool {
        matches!(self, ExitState::Exited(Some(0)))
    }
}

impl Display for ExitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitState::Exited(Some(code)) => write!(f, "exit code {code}"),
            ExitState::Exited(None) => f.write_str("signal"),
            ExitState::TimedOut => f.write_str("timeout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub state: ExitState,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Wall clock time between spawn and exit.
    pub elapsed: Duration,
}

/// A capability to run one process to completion.
pub trait ProcessRunner {
    /// Run `invocation` and capture its output.
    ///
    /// An `Err` means the process could not be started. Failing or timed out
    /// processes are reported through [`ProcessOutput::state`].
    fn run(&self, invocation: &Invocation, timeout: Option<Duration>) -> io::Result<ProcessOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation, timeout: Option<Duration>) -> io::Result<ProcessOutput> {
        (**self).run(invocation, timeout)
    }
}
