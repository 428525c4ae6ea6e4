use std::{fmt::Display, time::Duration};

/// Human readable rendering of a test duration.
///
/// - below one second: whole milliseconds, `2ms`
/// - below one minute: seconds with two decimals, `1.50s`
/// - otherwise: minutes and seconds with one decimal, `1m 5.3s`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HumanDuration(pub Duration);

impl Display for HumanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.0.as_secs_f64();
        let rendered = if secs < 1.0 {
            format!("{:.0}ms", secs * 1000.0)
        } else if secs < 60.0 {
            format!("{secs:.2}s")
        } else {
            let minutes = (secs / 60.0).floor();
            let rest = secs - minutes * 60.0;
            format!("{minutes:.0}m {rest:.1}s")
        };
        // `pad` keeps width and alignment flags working for table columns.
        f.pad(&rendered)
    }
}

impl From<Duration> for HumanDuration {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}
