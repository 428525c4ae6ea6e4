use std::{process::ExitCode, time::Duration};

use crate::{formatter::FormatError, outcome::TestOutcome};

/// Run state collected while tests execute.
///
/// Outcomes are kept in execution order. The counters only ever grow.
#[derive(Debug, Default)]
pub struct Aggregator {
    outcomes: Vec<TestOutcome>,
    passed: usize,
    failed: usize,
    timed_out: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Store an outcome and return the stored record.
    pub fn record(&mut self, outcome: TestOutcome) -> &TestOutcome {
        match outcome.passed() {
            true => self.passed += 1,
            false => self.failed += 1,
        }
        if outcome.timed_out() {
            self.timed_out += 1;
        }
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn finish<FmtError>(self, filtered_out: usize, wall_time: Duration) -> TimingReport<FmtError> {
        TimingReport {
            outcomes: self.outcomes,
            passed: self.passed,
            failed: self.failed,
            timed_out: self.timed_out,
            filtered_out,
            wall_time,
            fmt_errors: Vec::new(),
        }
    }
}

/// Totals derived from a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    /// Includes timed out tests.
    pub failed: usize,
    pub timed_out: usize,
    pub filtered_out: usize,
    /// Sum of all test durations.
    pub total_time: Duration,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct TimingReport<FmtError> {
    /// Outcomes in execution order.
    pub outcomes: Vec<TestOutcome>,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub filtered_out: usize,
    /// Wall clock time of the whole run, discovery included.
    pub wall_time: Duration,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<FmtError> TimingReport<FmtError> {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total: self.outcomes.len(),
            passed: self.passed,
            failed: self.failed,
            timed_out: self.timed_out,
            filtered_out: self.filtered_out,
            total_time: self.outcomes.iter().map(|outcome| outcome.duration).sum(),
        }
    }

    /// Outcomes from slowest to fastest.
    ///
    /// Equal durations keep their execution order.
    pub fn ranked(&self) -> Vec<&TestOutcome> {
        let mut ranked: Vec<_> = self.outcomes.iter().collect();
        ranked.sort_by(|a, b| b.duration.cmp(&a.duration));
        ranked
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.failed == 0 && !self.outcomes.is_empty() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}
