//! Snapshot tests for summary rendering.
//!
//! The summary is a pure function of the run report, so the rendered text is
//! fully deterministic and safe to snapshot.

use gantry::{discover, render_summary, run, FixtureDecl, RowDecl, StaticSource, TestSignal, UnitDecl, Value};

fn mixed_suite() -> StaticSource {
    StaticSource(vec![
        FixtureDecl::new("calculator")
            .with_unit(
                UnitDecl::new("addition", |case| {
                    let a = case.args[0].as_int().unwrap_or(0);
                    let b = case.args[1].as_int().unwrap_or(0);
                    let expected = case.expected.and_then(Value::as_int).unwrap_or(0);
                    if a + b == expected {
                        TestSignal::Pass
                    } else {
                        TestSignal::mismatch(expected, a + b, "sum mismatch")
                    }
                })
                .with_rows(vec![
                    RowDecl::with_expected(vec![Value::Int(2), Value::Int(3)], Value::Int(5)),
                    // Deliberately wrong expectation to exercise failure lines.
                    RowDecl::with_expected(vec![Value::Int(2), Value::Int(2)], Value::Int(5)),
                ]),
            )
            .with_unit(UnitDecl::new("remainder", |_| {
                TestSignal::Skip("not implemented".to_string())
            })),
        FixtureDecl::new("greeting").with_unit(UnitDecl::new("panics", |_| panic!("name must not be empty"))),
    ])
}

#[test]
fn test_summary_snapshot() {
    let fixtures = discover(&mixed_suite()).unwrap();
    let report = run(&fixtures, None);
    let summary = render_summary(&report);

    insta::assert_snapshot!(summary.trim_end(), @r"
    Passed: 1, Failed: 2, Skipped: 1, Total: 4
    calculator.addition[1]: sum mismatch (expected 5, actual 4)
    greeting.panics[0]: name must not be empty
    ");
}

#[test]
fn test_all_passing_snapshot() {
    let source = StaticSource(vec![
        FixtureDecl::new("green").with_unit(UnitDecl::new("ok", |_| TestSignal::Pass)),
    ]);
    let report = run(&discover(&source).unwrap(), None);

    insta::assert_snapshot!(render_summary(&report).trim_end(), @"Passed: 1, Failed: 0, Skipped: 0, Total: 1");
}
