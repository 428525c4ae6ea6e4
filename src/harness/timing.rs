use std::time::Instant;

use tracing::info;

use crate::{
    HarnessError, TimingReport,
    config::HarnessConfig,
    discovery::discover,
    filter::FilteredTests,
    formatter::*,
    report::Aggregator,
    runner::{ProcessRunner, run_isolated},
};

use super::FmtErrors;

pub struct TimingHarness<Runner, Formatter> {
    pub(crate) config: HarnessConfig,
    pub(crate) runner: Runner,
    pub(crate) formatter: Formatter,
}

impl<Runner: ProcessRunner, Formatter: TimingFormatter> TimingHarness<Runner, Formatter> {
    /// Discover all tests, run each one in its own engine process and report.
    ///
    /// Only discovery problems end the run early. Whatever happens to a single
    /// test is part of the returned report.
    pub fn run(self) -> Result<TimingReport<Formatter::Error>, HarnessError> {
        let now = Instant::now();
        let Self {
            config,
            runner,
            mut formatter,
        } = self;

        let mut fmt_errors = Vec::new();
        fmt_errors.push_on_error(
            FormatError::DiscoveryStart,
            formatter.fmt_discovery_start(FmtDiscoveryStart {
                engine: &config.engine,
            }),
        );

        let discovered = discover(&runner, &config.engine, config.timeout)?;
        if discovered.is_empty() {
            return Err(HarnessError::NoTests);
        }

        let discovered_count = discovered.len();
        let FilteredTests {
            tests,
            filtered_out,
        } = config.filter.filter(discovered);
        if tests.is_empty() {
            return Err(HarnessError::NothingSelected {
                discovered: discovered_count,
            });
        }

        let total = tests.len();
        info!(tests = total, filtered_out, "starting run");
        fmt_errors.push_on_error(
            FormatError::RunStart,
            formatter.fmt_run_start(FmtRunStart {
                tests: total,
                filtered_out,
            }),
        );

        let mut aggregator = Aggregator::with_capacity(total);
        for (index, id) in tests.iter().enumerate() {
            let index = index + 1;
            fmt_errors.push_on_error(
                FormatError::TestStart,
                formatter.fmt_test_start(FmtTestStart { index, total, id }),
            );

            let outcome =
                aggregator.record(run_isolated(&runner, &config.engine, id, config.timeout));
            fmt_errors.push_on_error(
                FormatError::TestOutcome,
                formatter.fmt_test_outcome(FmtTestOutcome {
                    index,
                    total,
                    outcome,
                }),
            );
        }

        let mut report = aggregator.finish(filtered_out, now.elapsed());
        info!(
            passed = report.passed,
            failed = report.failed,
            wall_time = ?report.wall_time,
            "run finished"
        );
        let fmt_res = formatter.fmt_report(FmtReport {
            report: &report,
            engine: &config.engine,
        });
        fmt_errors.push_on_error(FormatError::Report, fmt_res);
        report.fmt_errors = fmt_errors;

        Ok(report)
    }
}

impl<Runner: ProcessRunner, Formatter: TestListFormatter> TimingHarness<Runner, Formatter> {
    /// Discover and filter tests, then hand them to the formatter without
    /// running anything.
    pub fn list(self) -> Result<Vec<(FormatError, Formatter::Error)>, HarnessError> {
        let Self {
            config,
            runner,
            mut formatter,
        } = self;

        let discovered = discover(&runner, &config.engine, config.timeout)?;
        if discovered.is_empty() {
            return Err(HarnessError::NoTests);
        }

        let FilteredTests {
            tests,
            filtered_out,
        } = config.filter.filter(discovered);

        let mut fmt_errors = Vec::new();
        for id in &tests {
            fmt_errors.push_on_error(
                FormatError::ListTest,
                formatter.fmt_list_test(FmtListTest { id }),
            );
        }
        fmt_errors.push_on_error(
            FormatError::EndListing,
            formatter.fmt_end_listing(FmtEndListing {
                tests: tests.len(),
                filtered_out,
            }),
        );

        Ok(fmt_errors)
    }
}

impl<Runner, Formatter> TimingHarness<Runner, Formatter> {
    pub fn new(config: HarnessConfig, runner: Runner, formatter: Formatter) -> Self {
        Self {
            config,
            runner,
            formatter,
        }
    }

    pub fn with_config(self, config: HarnessConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_runner<WithRunner: ProcessRunner>(
        self,
        runner: WithRunner,
    ) -> TimingHarness<WithRunner, Formatter> {
        TimingHarness {
            config: self.config,
            runner,
            formatter: self.formatter,
        }
    }

    pub fn with_formatter<WithFormatter>(
        self,
        formatter: WithFormatter,
    ) -> TimingHarness<Runner, WithFormatter> {
        TimingHarness {
            config: self.config,
            runner: self.runner,
            formatter,
        }
    }
}
