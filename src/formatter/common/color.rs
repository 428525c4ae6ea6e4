use std::io;

/// When to emit ANSI colors.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, clap::ValueEnum)]
pub enum ColorSetting {
    /// Only when the target is a terminal.
    #[default]
    #[value(name = "auto")]
    Automatic,
    Always,
    Never,
}

impl ColorSetting {
    pub fn use_color(self, target: &impl SupportsColor) -> bool {
        match self {
            ColorSetting::Automatic => target.supports_color(),
            ColorSetting::Always => true,
            ColorSetting::Never => false,
        }
    }
}

pub(crate) mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const YELLOW: &str = "\x1b[33m";
}

pub trait SupportsColor {
    fn supports_color(&self) -> bool;
}

impl<T: io::IsTerminal> SupportsColor for T {
    fn supports_color(&self) -> bool {
        self.is_terminal()
    }
}
