use crate::formatter::*;

/// A formatter that produces no output.
///
/// `NoFormatter` implements both formatter traits but discards every event.
/// This is useful when ranktest is embedded into something that does its own
/// reporting from the returned
/// [`TimingReport`](crate::TimingReport).
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl TimingFormatter for NoFormatter {
    type Error = ();

    fn fmt_run_start(&mut self, _: FmtRunStart) -> Result<(), ()> {
        Ok(())
    }

    fn fmt_test_outcome(&mut self, _: FmtTestOutcome<'_>) -> Result<(), ()> {
        Ok(())
    }

    fn fmt_report(&mut self, _: FmtReport<'_, '_, ()>) -> Result<(), ()> {
        Ok(())
    }
}

impl TestListFormatter for NoFormatter {
    type Error = ();

    fn fmt_list_test(&mut self, _: FmtListTest<'_>) -> Result<(), ()> {
        Ok(())
    }
}
