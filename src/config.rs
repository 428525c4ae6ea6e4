//! How the external test engine is invoked.

use std::{convert::Infallible, str::FromStr, time::Duration};

use crate::{filter::DefaultFilter, runner::Invocation, test::TestId};

/// The command prefix used to reach the engine, e.g. `pixi run mojo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Default for EngineCommand {
    fn default() -> Self {
        Self::new("pixi").with_arg("run").with_arg("mojo")
    }
}

impl FromStr for EngineCommand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        Ok(match parts.next() {
            Some(program) => Self {
                program,
                args: parts.collect(),
            },
            None => Self::default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub command: EngineCommand,
    /// Directory handed to the engine with `-I`.
    pub include: String,
    /// Directory the tests live in, also stripped from report paths.
    pub test_root: String,
    /// File extension of test files, without the dot.
    pub extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: EngineCommand::default(),
            include: "./src".to_string(),
            test_root: "tests".to_string(),
            extension: "mojo".to_string(),
        }
    }
}

impl EngineConfig {
    /// The test root without trailing slashes.
    pub fn root(&self) -> &str {
        self.test_root.trim_end_matches('/')
    }

    fn base_invocation(&self) -> Invocation {
        Invocation::new(&self.command.program)
            .args(&self.command.args)
            .arg("test")
            .arg("-I")
            .arg(&self.include)
    }

    /// `{engine} test -I {include} {root}/ --collect-only`
    pub fn collect_invocation(&self) -> Invocation {
        self.base_invocation()
            .arg(format!("{}/", self.root()))
            .arg("--collect-only")
    }

    /// `{engine} test -I {include} {id}`
    pub fn test_invocation(&self, id: &TestId) -> Invocation {
        self.base_invocation().arg(id.as_str())
    }
}

/// Everything the harness needs besides its runner and formatter.
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    pub engine: EngineConfig,
    pub filter: DefaultFilter,
    /// Upper bound for every single engine invocation, `None` waits forever.
    pub timeout: Option<Duration>,
}
