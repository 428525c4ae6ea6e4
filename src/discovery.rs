//! Test discovery through the engine's `--collect-only` mode.

use std::time::Duration;

use regex::Regex;
use tracing::{debug, info};

use crate::{
    HarnessError,
    config::EngineConfig,
    runner::{ExitState, ProcessRunner},
    test::TestId,
};

/// Build the pattern matching `{root}/<path>.{extension}::test_<name>()`.
pub fn id_pattern(test_root: &str, extension: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"{root}/[^\s:]*\.{ext}::test_\w*\(\)",
        root = regex::escape(test_root.trim_end_matches('/')),
        ext = regex::escape(extension.trim_start_matches('.')),
    ))
}

/// Extract test identifiers from collect output.
///
/// Identifiers are returned in the order they appear, duplicates included.
/// Lines without an identifier are ignored.
pub fn parse_collected(stdout: &str, pattern: &Regex) -> Vec<TestId> {
    stdout
        .lines()
        .filter_map(|line| pattern.find(line))
        .map(|found| TestId::from(found.as_str()))
        .collect()
}

/// Ask the engine for every test below the test root.
pub fn discover<R: ProcessRunner + ?Sized>(
    runner: &R,
    engine: &EngineConfig,
    timeout: Option<Duration>,
) -> Result<Vec<TestId>, HarnessError> {
    let invocation = engine.collect_invocation();
    let output = runner
        .run(&invocation, timeout)
        .map_err(|source| HarnessError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

    if output.state != ExitState::Exited(Some(0)) {
        return Err(HarnessError::Discovery {
            state: output.state,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let tests = parse_collected(&stdout, &id_pattern(engine.root(), &engine.extension)?);
    debug!(lines = stdout.lines().count(), "parsed collect output");
    info!(count = tests.len(), elapsed = ?output.elapsed, "discovered tests");
    Ok(tests)
}
