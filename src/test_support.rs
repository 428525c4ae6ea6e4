use std::{cell::RefCell, collections::HashMap, io, time::Duration};

use crate::{
    TimingHarness,
    config::HarnessConfig,
    formatter::no::NoFormatter,
    runner::{ExitState, Invocation, ProcessOutput, ProcessRunner},
};

/// The canned answer for one engine invocation.
#[derive(Debug, Clone)]
pub struct Script {
    pub state: ExitState,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl Script {
    pub fn exit(code: i32) -> Self {
        Self {
            state: ExitState::Exited(Some(code)),
            stdout: String::new(),
            stderr: String::new(),
            elapsed: Duration::from_millis(1),
        }
    }

    pub fn timeout(elapsed: Duration) -> Self {
        Self {
            state: ExitState::TimedOut,
            elapsed,
            ..Self::exit(0)
        }
    }

    /// A passing test reporting `secs` seconds.
    pub fn pass(secs: f64) -> Self {
        Self::exit(0).stdout(format!("Test completed in {secs}s\n"))
    }

    /// A failing test reporting `secs` seconds.
    pub fn fail(secs: f64, stderr: &str) -> Self {
        Self::exit(1)
            .stdout(format!("Test completed in {secs}s\n"))
            .stderr(stderr)
    }

    pub fn stdout(self, stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..self
        }
    }

    pub fn stderr(self, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            ..self
        }
    }
}

/// A [`ProcessRunner`] answering from a table instead of spawning anything.
///
/// Discovery calls are recognized by `--collect-only`, every other call is
/// looked up by its last argument. Unknown calls fail like a missing program.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    collect: Option<Script>,
    tests: HashMap<String, Script>,
    pub calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn with_collect(mut self, script: Script) -> Self {
        self.collect = Some(script);
        self
    }

    pub fn with_test(mut self, id: &str, script: Script) -> Self {
        self.tests.insert(id.to_string(), script);
        self
    }

    /// Collect output listing `ids` and a passing script for each of them.
    pub fn with_passing(mut self, tests: &[(&str, f64)]) -> Self {
        let listing: String = tests.iter().map(|(id, _)| format!("{id}\n")).collect();
        self.collect = Some(Script::exit(0).stdout(listing));
        for (id, secs) in tests {
            self.tests.insert(id.to_string(), Script::pass(*secs));
        }
        self
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation, _: Option<Duration>) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let script = match invocation.args.iter().any(|arg| arg == "--collect-only") {
            true => self.collect.as_ref(),
            false => invocation
                .args
                .last()
                .and_then(|id| self.tests.get(id.as_str())),
        };
        let script = script.ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(ProcessOutput {
            state: script.state,
            stdout: script.stdout.clone().into_bytes(),
            stderr: script.stderr.clone().into_bytes(),
            elapsed: script.elapsed,
        })
    }
}

pub fn harness(runner: &ScriptedRunner) -> TimingHarness<&ScriptedRunner, NoFormatter> {
    TimingHarness {
        config: HarnessConfig::default(),
        runner,
        formatter: NoFormatter,
    }
}
