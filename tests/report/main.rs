use std::{process::ExitCode, time::Duration};

use pretty_assertions::assert_eq;
use ranktest::{
    HarnessError,
    config::HarnessConfig,
    formatter::{common::color::ColorSetting, pretty::PrettyFormatter},
    harness,
};

mod lib;
use lib::{Buffer, FakeEngine};

const RULE_EQ: &str = "================================================================================";
const RULE_DASH: &str = "--------------------------------------------------------------------------------";

fn three_tests() -> FakeEngine {
    FakeEngine::default()
        .listing(
            0,
            "Collecting...\n\
             <tests/a.mojo::test_fast()>\n\
             <tests/b.mojo::test_slow()>\n\
             <tests/c.mojo::test_mid()>\n\
             3 tests collected\n",
            "",
        )
        .test(
            "tests/a.mojo::test_fast()",
            0,
            "Test completed in 0.5s\n",
            "",
        )
        .test(
            "tests/b.mojo::test_slow()",
            1,
            "Test completed in 65.3s\n",
            "unhandled exception\nassertion failed: expected 3\ngot 4\n",
        )
        .test(
            "tests/c.mojo::test_mid()",
            0,
            "Test completed in 2.0s\nsome noise\n",
            "",
        )
}

#[test]
fn ranks_slowest_first() {
    let actual = Buffer::default();
    let report = harness(HarnessConfig::default())
        .with_runner(three_tests())
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run()
        .unwrap();

    let expected = format!(
        "\
Collecting tests...
Found 3 tests

Running tests individually...

[1/3] Running a.mojo::test_fast... ✓ (500ms)
[2/3] Running b.mojo::test_slow... ✗ (1m 5.3s)
  Error output:
    unhandled exception
    assertion failed: expected 3
    got 4
[3/3] Running c.mojo::test_mid... ✓ (2.00s)

{RULE_EQ}
TEST RESULTS SORTED BY EXECUTION TIME (SLOWEST TO FASTEST)
{RULE_EQ}
Rank   Duration   Status   Test
{RULE_DASH}
1      1m 5.3s    FAIL     b.mojo::test_slow()
2      2.00s      PASS     c.mojo::test_mid()
3      500ms      PASS     a.mojo::test_fast()
{RULE_DASH}
Total: 3 | Passed: 2 | Failed: 1
Total execution time: 1m 7.8s
"
    );

    assert_eq!(actual.try_to_string().unwrap(), expected);
    assert_eq!(report.exit_code(), ExitCode::FAILURE);
    assert!(report.fmt_errors.is_empty());
}

#[test]
fn degraded_tests_are_still_reported() {
    let engine = FakeEngine::default()
        .listing(
            0,
            "tests/a.mojo::test_crash()\ntests/a.mojo::test_garbled()\ntests/a.mojo::test_hang()\n",
            "",
        )
        .test(
            "tests/a.mojo::test_crash()",
            134,
            "",
            "Segmentation fault\n",
        )
        .test("tests/a.mojo::test_garbled()", 0, "no duration here\n", "")
        .hanging_test("tests/a.mojo::test_hang()", Duration::from_secs(5));

    let actual = Buffer::default();
    let report = harness(HarnessConfig::default())
        .with_runner(engine)
        .with_formatter(
            PrettyFormatter::default()
                .with_target(actual.clone())
                .with_tail_lines(1),
        )
        .run()
        .unwrap();

    let expected = format!(
        "\
Collecting tests...
Found 3 tests

Running tests individually...

[1/3] Running a.mojo::test_crash... ✗ (0ms)
  Error output:
    Segmentation fault
[2/3] Running a.mojo::test_garbled... ✗ (0ms)
  Error output:
    no duration here
[3/3] Running a.mojo::test_hang... ✗ TIMEOUT (5.00s)
  Error output:

{RULE_EQ}
TEST RESULTS SORTED BY EXECUTION TIME (SLOWEST TO FASTEST)
{RULE_EQ}
Rank   Duration   Status   Test
{RULE_DASH}
1      5.00s      TIMEOUT  a.mojo::test_hang()
2      0ms        FAIL     a.mojo::test_crash()
3      0ms        FAIL     a.mojo::test_garbled()
{RULE_DASH}
Total: 3 | Passed: 0 | Failed: 3 | Timed out: 1
Total execution time: 5.00s
"
    );

    assert_eq!(actual.try_to_string().unwrap(), expected);
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.exit_code(), ExitCode::FAILURE);
}

#[test]
fn long_failure_output_is_cut_to_the_last_ten_lines() {
    let stderr: String = (1..=12).map(|n| format!("line {n}\n")).collect();
    let engine = FakeEngine::default()
        .listing(0, "tests/a.mojo::test_noisy()\n", "")
        .test(
            "tests/a.mojo::test_noisy()",
            1,
            "Test completed in 1.0s\n",
            &stderr,
        );

    let actual = Buffer::default();
    harness(HarnessConfig::default())
        .with_runner(engine)
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run()
        .unwrap();

    let expected = format!(
        "\
Collecting tests...
Found 1 test

Running tests individually...

[1/1] Running a.mojo::test_noisy... ✗ (1.00s)
  Error output:
    line 3
    line 4
    line 5
    line 6
    line 7
    line 8
    line 9
    line 10
    line 11
    line 12

{RULE_EQ}
TEST RESULTS SORTED BY EXECUTION TIME (SLOWEST TO FASTEST)
{RULE_EQ}
Rank   Duration   Status   Test
{RULE_DASH}
1      1.00s      FAIL     a.mojo::test_noisy()
{RULE_DASH}
Total: 1 | Passed: 0 | Failed: 1
Total execution time: 1.00s
"
    );

    assert_eq!(actual.try_to_string().unwrap(), expected);
}

#[test]
fn colors_status_labels() {
    let actual = Buffer::colored();
    let report = harness(HarnessConfig::default())
        .with_runner(three_tests())
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run()
        .unwrap();

    let output = actual.try_to_string().unwrap();
    assert!(output.contains("1      1m 5.3s    \x1b[91mFAIL    \x1b[0m b.mojo::test_slow()\n"));
    assert!(output.contains("2      2.00s      \x1b[92mPASS    \x1b[0m c.mojo::test_mid()\n"));
    assert_eq!(report.summary().total, 3);
}

#[test]
fn color_can_be_disabled() {
    let actual = Buffer::colored();
    harness(HarnessConfig::default())
        .with_runner(three_tests())
        .with_formatter(
            PrettyFormatter::default()
                .with_target(actual.clone())
                .with_color_setting(ColorSetting::Never),
        )
        .run()
        .unwrap();

    assert!(!actual.try_to_string().unwrap().contains('\x1b'));
}

#[test]
fn discovery_failure_aborts() {
    let engine = FakeEngine::default().listing(1, "", "error: unable to locate module 'zip'\n");

    let actual = Buffer::default();
    let err = harness(HarnessConfig::default())
        .with_runner(engine)
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .run()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error collecting tests (exit code 1):\nerror: unable to locate module 'zip'\n"
    );
    assert_eq!(actual.try_to_string().unwrap(), "Collecting tests...\n");
}

#[test]
fn nothing_discovered() {
    let engine = FakeEngine::default().listing(0, "collected 0 items\n", "");
    let err = harness(HarnessConfig::default())
        .with_runner(engine)
        .with_formatter(PrettyFormatter::default().with_target(Buffer::default()))
        .run()
        .unwrap_err();

    assert!(matches!(err, HarnessError::NoTests));
    assert_eq!(err.to_string(), "No tests found!");
}

#[test]
fn lists_without_running() {
    let actual = Buffer::default();
    let fmt_errors = harness(HarnessConfig::default())
        .with_runner(three_tests())
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .list()
        .unwrap();

    assert!(fmt_errors.is_empty());
    assert_eq!(
        actual.try_to_string().unwrap(),
        "\
tests/a.mojo::test_fast(): test
tests/b.mojo::test_slow(): test
tests/c.mojo::test_mid(): test

3 tests
"
    );
}

#[test]
fn listing_nothing_fails() {
    let engine = FakeEngine::default().listing(0, "collected 0 items\n", "");
    let actual = Buffer::default();
    let err = harness(HarnessConfig::default())
        .with_runner(engine)
        .with_formatter(PrettyFormatter::default().with_target(actual.clone()))
        .list()
        .unwrap_err();

    assert!(matches!(err, HarnessError::NoTests));
    assert_eq!(actual.try_to_string().unwrap(), "");
}
