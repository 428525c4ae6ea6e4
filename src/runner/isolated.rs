use std::time::Duration;

use tracing::warn;

use crate::{
    config::EngineConfig,
    duration,
    outcome::{TestFailure, TestOutcome, TestStatus},
    runner::{ExitState, ProcessOutput, ProcessRunner},
    test::TestId,
};

/// Run a single test in its own engine process and classify the result.
///
/// This never fails. Anything going wrong with the one test, including the
/// engine not starting, ends up in the returned outcome.
pub fn run_isolated<R: ProcessRunner + ?Sized>(
    runner: &R,
    engine: &EngineConfig,
    id: &TestId,
    timeout: Option<Duration>,
) -> TestOutcome {
    let invocation = engine.test_invocation(id);
    let ProcessOutput {
        state,
        stdout,
        stderr,
        elapsed,
    } = match runner.run(&invocation, timeout) {
        Ok(output) => output,
        Err(err) => {
            warn!(test = %id, command = %invocation, %err, "could not start engine");
            let msg = format!("failed to run `{invocation}`: {err}");
            return TestOutcome::new(
                id.clone(),
                TestStatus::Failed(TestFailure::Spawn(err.to_string())),
                Duration::ZERO,
            )
            .with_output("", msg);
        }
    };

    let (status, duration) = match state {
        ExitState::TimedOut => {
            warn!(test = %id, ?elapsed, "test timed out");
            (TestStatus::TimedOut, elapsed)
        }
        ExitState::Exited(code) => {
            let reported = duration::parse_first_line(&String::from_utf8_lossy(&stdout));
            match (code, reported) {
                (Some(0), Ok(duration)) => (TestStatus::Passed, duration),
                (Some(0), Err(err)) => {
                    warn!(test = %id, %err, "unusable duration line");
                    (
                        TestStatus::Failed(TestFailure::MalformedDuration(err)),
                        Duration::ZERO,
                    )
                }
                (code, Ok(duration)) => (TestStatus::Failed(TestFailure::ExitCode(code)), duration),
                (code, Err(_)) => (TestStatus::Failed(TestFailure::ExitCode(code)), Duration::ZERO),
            }
        }
    };

    TestOutcome::new(id.clone(), status, duration).with_output(stdout, stderr)
}
