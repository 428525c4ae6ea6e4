//! Command line entry point.
//!
//! Arguments are parsed with clap and turned into a [`HarnessConfig`] plus a
//! configured [`PrettyFormatter`]. Only [`run`] decides about the process exit
//! code.

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use tracing::warn;

use crate::{
    HarnessError,
    config::{EngineCommand, EngineConfig, HarnessConfig},
    filter::DefaultFilter,
    formatter::{FormatError, common::color::ColorSetting, pretty::PrettyFormatter},
    harness,
};

/// Run every test in its own engine process and rank them by duration
#[derive(Parser, Debug)]
#[command(name = "ranktest", version, about, long_about = None)]
pub struct Cli {
    /// Command used to reach the test engine, split on whitespace
    #[arg(long, value_name = "COMMAND", default_value = "pixi run mojo")]
    pub engine: EngineCommand,

    /// Source directory put on the engine's include path
    #[arg(short = 'I', long, value_name = "DIR", default_value = "./src")]
    pub include: String,

    /// Directory containing the tests
    #[arg(long, value_name = "DIR", default_value = "tests")]
    pub test_root: String,

    /// File extension of test files
    #[arg(long, value_name = "EXT", default_value = "mojo")]
    pub extension: String,

    /// Kill a single engine call after this many seconds, 0 waits forever
    #[arg(long, value_name = "SECS", default_value = "300", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Lines of output shown for a failing test
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub tail: usize,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorSetting::Automatic)]
    pub color: ColorSetting,

    /// List the discovered tests instead of running them
    #[arg(long)]
    pub list: bool,

    /// Only run tests whose identifier contains this text
    #[arg(long, value_name = "TEXT")]
    pub filter: Vec<String>,

    /// Skip tests whose identifier contains this text
    #[arg(long, value_name = "TEXT")]
    pub skip: Vec<String>,

    /// Match --filter and --skip against whole identifiers
    #[arg(long)]
    pub exact: bool,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout.is_zero() {
            true => None,
            false => Some(self.timeout),
        }
    }

    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            engine: EngineConfig {
                command: self.engine.clone(),
                include: self.include.clone(),
                test_root: self.test_root.clone(),
                extension: self.extension.clone(),
            },
            filter: DefaultFilter::new()
                .with_exact(self.exact)
                .with_filter(self.filter.iter().cloned())
                .with_skip(self.skip.iter().cloned()),
            timeout: self.timeout(),
        }
    }

    pub fn formatter(&self) -> PrettyFormatter<std::io::Stdout> {
        PrettyFormatter::default()
            .with_color_setting(self.color)
            .with_tail_lines(self.tail)
    }
}

/// Seconds as a non-negative, finite number.
fn parse_timeout(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg.parse().map_err(|err: std::num::ParseFloatError| err.to_string())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("`{arg}` is not a non-negative number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|err| format!("`{arg}`: {err}"))
}

fn report_fmt_errors<E: std::fmt::Display>(fmt_errors: &[(FormatError, E)]) {
    for (event, err) in fmt_errors {
        warn!(%event, %err, "could not write output");
    }
}

/// Parse the command line, run the harness and map the result to an exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let harness = harness(cli.config()).with_formatter(cli.formatter());

    let result = match cli.list {
        true => harness.list().map(|fmt_errors| {
            report_fmt_errors(&fmt_errors);
            ExitCode::SUCCESS
        }),
        false => harness.run().map(|report| {
            report_fmt_errors(&report.fmt_errors);
            report.exit_code()
        }),
    };

    result.unwrap_or_else(|err: HarnessError| {
        eprintln!("{err}");
        ExitCode::FAILURE
    })
}
