use std::io;

use crate::{
    formatter::{
        common::{
            color::{ColorSetting, SupportsColor, colors::*},
            duration::HumanDuration,
        },
        *,
    },
    outcome::TestStatus,
};

const RULE_WIDTH: usize = 80;

/// Console output: live progress while running, a ranked table at the end.
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color_setting: ColorSetting,
    tail_lines: usize,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            color_setting: Default::default(),
            tail_lines: 10,
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(
        self,
        with_target: WithTarget,
    ) -> PrettyFormatter<WithTarget> {
        PrettyFormatter {
            target: with_target,
            color_setting: self.color_setting,
            tail_lines: self.tail_lines,
        }
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
            ..self
        }
    }

    /// How many trailing lines of a failing test's output to show.
    pub fn with_tail_lines(self, tail_lines: usize) -> Self {
        PrettyFormatter { tail_lines, ..self }
    }

    fn rule(&mut self, c: char) -> io::Result<()> {
        writeln!(self.target, "{}", c.to_string().repeat(RULE_WIDTH))
    }
}

impl<W: io::Write + SupportsColor> PrettyFormatter<W> {
    /// Return whether this formatter will currently emit colored output.
    pub fn use_color(&self) -> bool {
        self.color_setting.use_color(&self.target)
    }

    fn status_color(status: &TestStatus) -> &'static str {
        match status {
            TestStatus::Passed => BRIGHT_GREEN,
            TestStatus::TimedOut => YELLOW,
            TestStatus::Failed(_) => BRIGHT_RED,
        }
    }
}

impl<W: io::Write + SupportsColor> TimingFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_discovery_start(&mut self, _: FmtDiscoveryStart<'_>) -> Result<(), io::Error> {
        writeln!(self.target, "Collecting tests...")?;
        self.target.flush()
    }

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), io::Error> {
        match data.tests + data.filtered_out {
            1 => write!(self.target, "Found 1 test")?,
            count => write!(self.target, "Found {count} tests")?,
        }
        if data.filtered_out > 0 {
            write!(self.target, " ({} filtered out)", data.filtered_out)?;
        }
        writeln!(self.target, "\n")?;
        writeln!(self.target, "Running tests individually...\n")
    }

    fn fmt_test_start(&mut self, data: FmtTestStart<'_>) -> Result<(), io::Error> {
        write!(
            self.target,
            "[{}/{}] Running {}::{}...",
            data.index,
            data.total,
            data.id.file_name(),
            data.id.function_name()
        )?;
        self.target.flush()
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> Result<(), io::Error> {
        let outcome = data.outcome;
        let duration = HumanDuration(outcome.duration);
        match &outcome.status {
            TestStatus::Passed => writeln!(self.target, " ✓ ({duration})")?,
            TestStatus::TimedOut => writeln!(self.target, " ✗ TIMEOUT ({duration})")?,
            TestStatus::Failed(_) => writeln!(self.target, " ✗ ({duration})")?,
        }

        if outcome.failed() && self.tail_lines > 0 {
            let output = outcome.failure_output();
            let lines: Vec<_> = output.lines().collect();
            writeln!(self.target, "  Error output:")?;
            for line in &lines[lines.len().saturating_sub(self.tail_lines)..] {
                writeln!(self.target, "    {line}")?;
            }
        }
        self.target.flush()
    }

    fn fmt_report(&mut self, data: FmtReport<'_, '_, io::Error>) -> Result<(), io::Error> {
        let FmtReport { report, engine } = data;
        let color = self.use_color();

        writeln!(self.target)?;
        self.rule('=')?;
        writeln!(
            self.target,
            "TEST RESULTS SORTED BY EXECUTION TIME (SLOWEST TO FASTEST)"
        )?;
        self.rule('=')?;
        writeln!(
            self.target,
            "{:<6} {:<10} {:<8} {}",
            "Rank", "Duration", "Status", "Test"
        )?;
        self.rule('-')?;

        for (rank, outcome) in report.ranked().into_iter().enumerate() {
            let duration = HumanDuration(outcome.duration);
            let label = outcome.status.label();
            let path = outcome.id.display_path(engine.root());
            match color {
                true => writeln!(
                    self.target,
                    "{:<6} {duration:<10} {}{label:<8}{RESET} {path}",
                    rank + 1,
                    Self::status_color(&outcome.status),
                )?,
                false => writeln!(self.target, "{:<6} {duration:<10} {label:<8} {path}", rank + 1)?,
            }
        }

        self.rule('-')?;
        let summary = report.summary();
        write!(
            self.target,
            "Total: {} | Passed: {} | Failed: {}",
            summary.total, summary.passed, summary.failed
        )?;
        if summary.timed_out > 0 {
            write!(self.target, " | Timed out: {}", summary.timed_out)?;
        }
        if summary.filtered_out > 0 {
            write!(self.target, " | Filtered out: {}", summary.filtered_out)?;
        }
        writeln!(self.target)?;
        writeln!(
            self.target,
            "Total execution time: {}",
            HumanDuration(summary.total_time)
        )?;
        self.target.flush()
    }
}

impl<W: io::Write> TestListFormatter for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_list_test(&mut self, data: FmtListTest<'_>) -> Result<(), io::Error> {
        writeln!(self.target, "{}: test", data.id)
    }

    fn fmt_end_listing(&mut self, data: FmtEndListing) -> Result<(), io::Error> {
        match data.tests {
            1 => writeln!(self.target, "\n1 test")?,
            count => writeln!(self.target, "\n{count} tests")?,
        }
        self.target.flush()
    }
}
