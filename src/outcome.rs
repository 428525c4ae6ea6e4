use std::{borrow::Cow, time::Duration};

use crate::{duration::DurationParseError, test::TestId};

/// The record of one isolated test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestOutcome {
    pub id: TestId,
    pub status: TestStatus,
    pub duration: Duration,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl TestOutcome {
    pub fn new(id: TestId, status: TestStatus, duration: Duration) -> Self {
        Self {
            id,
            status,
            duration,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    pub fn with_output(self, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            ..self
        }
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.is_bad()
    }

    pub fn timed_out(&self) -> bool {
        self.status.timed_out()
    }

    /// The output worth showing for a failure.
    ///
    /// When the process itself failed that is stderr, otherwise stdout.
    pub fn failure_output(&self) -> Cow<'_, str> {
        let raw = match self.status.process_failed() {
            true => &self.stderr,
            false => &self.stdout,
        };
        String::from_utf8_lossy(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    TimedOut,
    Failed(TestFailure),
}

impl TestStatus {
    pub fn is_bad(&self) -> bool {
        matches!(self, TestStatus::Failed(_) | TestStatus::TimedOut)
    }

    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, TestStatus::TimedOut)
    }

    /// Whether the engine process did not finish successfully on its own.
    pub fn process_failed(&self) -> bool {
        match self {
            TestStatus::Passed => false,
            TestStatus::TimedOut => true,
            TestStatus::Failed(failure) => !matches!(failure, TestFailure::MalformedDuration(_)),
        }
    }

    /// Fixed width label used by the ranked report.
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASS",
            TestStatus::TimedOut => "TIMEOUT",
            TestStatus::Failed(_) => "FAIL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestFailure {
    /// The engine exited with a non zero code, `None` if killed by a signal.
    ExitCode(Option<i32>),
    /// The engine exited successfully but its duration line was unusable.
    MalformedDuration(DurationParseError),
    /// The engine could not be started at all.
    Spawn(String),
}
