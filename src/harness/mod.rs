mod timing;
use std::io;

pub use timing::TimingHarness;

use crate::{
    config::HarnessConfig, formatter::FormatError, formatter::pretty::PrettyFormatter,
    runner::SystemRunner,
};

/// A harness spawning real engine processes and printing to stdout.
pub fn harness(config: HarnessConfig) -> TimingHarness<SystemRunner, PrettyFormatter<io::Stdout>> {
    TimingHarness {
        config,
        runner: SystemRunner::default(),
        formatter: PrettyFormatter::default(),
    }
}

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, event: FormatError, res: Result<(), E>);
}

impl<E> FmtErrors<E> for Vec<(FormatError, E)> {
    fn push_on_error(&mut self, event: FormatError, res: Result<(), E>) {
        if let Err(err) = res {
            self.push((event, err));
        }
    }
}
