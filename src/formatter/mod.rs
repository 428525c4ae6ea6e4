//! Output formatting for ranktest.
//!
//! The harness never writes to the console itself. It emits events to a
//! [`TimingFormatter`] while running and to a [`TestListFormatter`] while
//! listing. Every event carries a small `Fmt*` struct with the data that is
//! known at that point.
//!
//! Formatter errors never abort a run. The harness collects them, tagged with
//! the [`FormatError`] naming the event, into the report.

use std::fmt::Display;

use crate::{
    config::EngineConfig,
    outcome::TestOutcome,
    report::TimingReport,
    test::TestId,
};

pub mod common;
pub mod no;
pub mod pretty;

/// The event a formatter failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    DiscoveryStart,
    RunStart,
    TestStart,
    TestOutcome,
    Report,
    ListTest,
    EndListing,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FormatError::DiscoveryStart => "fmt_discovery_start",
            FormatError::RunStart => "fmt_run_start",
            FormatError::TestStart => "fmt_test_start",
            FormatError::TestOutcome => "fmt_test_outcome",
            FormatError::Report => "fmt_report",
            FormatError::ListTest => "fmt_list_test",
            FormatError::EndListing => "fmt_end_listing",
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FmtDiscoveryStart<'c> {
    pub engine: &'c EngineConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtRunStart {
    /// Tests about to run.
    pub tests: usize,
    /// Tests removed by the filter.
    pub filtered_out: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtTestStart<'t> {
    /// 1-based position in the run.
    pub index: usize,
    pub total: usize,
    pub id: &'t TestId,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtTestOutcome<'o> {
    /// 1-based position in the run.
    pub index: usize,
    pub total: usize,
    pub outcome: &'o TestOutcome,
}

#[derive(Debug)]
pub struct FmtReport<'r, 'c, E> {
    pub report: &'r TimingReport<E>,
    pub engine: &'c EngineConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtListTest<'t> {
    pub id: &'t TestId,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtEndListing {
    pub tests: usize,
    pub filtered_out: usize,
}

/// Receives the events of a test run.
pub trait TimingFormatter {
    type Error;

    fn fmt_discovery_start(&mut self, data: FmtDiscoveryStart<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error>;

    fn fmt_test_start(&mut self, data: FmtTestStart<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> Result<(), Self::Error>;

    fn fmt_report(&mut self, data: FmtReport<'_, '_, Self::Error>) -> Result<(), Self::Error>;
}

/// Receives the events of listing tests without running them.
pub trait TestListFormatter {
    type Error;

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), Self::Error>;

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}
