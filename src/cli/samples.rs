//! The bundled demo suite.
//!
//! A small calculator/greeting pair exercised through the harness, so the
//! `gantry` binary demonstrates parameter rows, lifecycle hooks, guard-clause
//! errors and deliberate skips without any embedder wiring. The sample
//! business logic stands in for the external code a real suite would test.

use gantry_core::{Case, FixtureDecl, LifecycleRefs, RowDecl, StaticSource, TestSignal, UnitDecl, Value};

// ============================================================================
// Sample business logic under test
// ============================================================================

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn divide(a: i64, b: i64) -> Result<i64, String> {
    if b == 0 {
        return Err("attempted to divide by zero".to_string());
    }
    Ok(a / b)
}

fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}

// ============================================================================
// Fixtures
// ============================================================================

/// The suite the `gantry` binary runs.
pub fn sample_suite() -> StaticSource {
    StaticSource(vec![calculator_fixture(), greeting_fixture()])
}

fn calculator_fixture() -> FixtureDecl {
    FixtureDecl::new("calculator")
        .with_tag("arith")
        .with_hook("reset", || {
            tracing::debug!("calculator state reset");
            Ok(())
        })
        .with_lifecycle(LifecycleRefs {
            setup_each: Some("reset".to_string()),
            ..Default::default()
        })
        .with_unit(
            UnitDecl::new("addition", check_addition)
                .with_tag("smoke")
                .with_rows(vec![
                    RowDecl::with_expected(vec![Value::Int(2), Value::Int(3)], Value::Int(5)),
                    RowDecl::with_expected(vec![Value::Int(10), Value::Int(20)], Value::Int(30)),
                    RowDecl::with_expected(vec![Value::Int(-5), Value::Int(5)], Value::Int(0)),
                ]),
        )
        .with_unit(
            UnitDecl::new("division", check_division).with_rows(vec![
                RowDecl::with_expected(vec![Value::Int(10), Value::Int(2)], Value::Int(5)),
                RowDecl::with_expected(vec![Value::Int(9), Value::Int(3)], Value::Int(3)),
            ]),
        )
        .with_unit(UnitDecl::new("division_by_zero_is_guarded", |_| {
            match divide(1, 0) {
                Err(message) if message.contains("zero") => TestSignal::Pass,
                Err(message) => TestSignal::mismatch("message containing 'zero'", message, "wrong guard message"),
                Ok(value) => TestSignal::mismatch("error", value, "guard clause did not trip"),
            }
        }))
        .with_unit(UnitDecl::new("remainder", |_| {
            TestSignal::Skip("not implemented".to_string())
        }))
}

fn greeting_fixture() -> FixtureDecl {
    FixtureDecl::new("greeting").with_unit(
        UnitDecl::new("greets_by_name", check_greeting)
            .with_tag("smoke")
            .with_rows(vec![
                RowDecl::with_expected(vec![Value::from("World")], Value::from("Hello, World!")),
                RowDecl::with_expected(vec![Value::from("Rustacean")], Value::from("Hello, Rustacean!")),
            ]),
    )
}

// ============================================================================
// Test bodies
// ============================================================================

fn check_addition(case: Case<'_>) -> TestSignal {
    let (Some(a), Some(b)) = (row_int(case, 0), row_int(case, 1)) else {
        return TestSignal::mismatch("two integer arguments", format!("{:?}", case.args), "malformed row");
    };
    let Some(expected) = case.expected.and_then(Value::as_int) else {
        return TestSignal::mismatch("integer expected value", "none", "malformed row");
    };
    let actual = add(a, b);
    if actual == expected {
        TestSignal::Pass
    } else {
        TestSignal::mismatch(expected, actual, "sum mismatch")
    }
}

fn check_division(case: Case<'_>) -> TestSignal {
    let (Some(a), Some(b)) = (row_int(case, 0), row_int(case, 1)) else {
        return TestSignal::mismatch("two integer arguments", format!("{:?}", case.args), "malformed row");
    };
    let Some(expected) = case.expected.and_then(Value::as_int) else {
        return TestSignal::mismatch("integer expected value", "none", "malformed row");
    };
    match divide(a, b) {
        Ok(actual) if actual == expected => TestSignal::Pass,
        Ok(actual) => TestSignal::mismatch(expected, actual, "quotient mismatch"),
        Err(message) => TestSignal::mismatch(expected, message, "unexpected division error"),
    }
}

fn check_greeting(case: Case<'_>) -> TestSignal {
    let Some(name) = case.args.first().and_then(Value::as_str) else {
        return TestSignal::mismatch("string argument", format!("{:?}", case.args), "malformed row");
    };
    let Some(expected) = case.expected.and_then(Value::as_str) else {
        return TestSignal::mismatch("string expected value", "none", "malformed row");
    };
    let actual = greet(name);
    if actual == expected {
        TestSignal::Pass
    } else {
        TestSignal::mismatch(expected, actual, "greeting mismatch")
    }
}

fn row_int(case: Case<'_>, index: usize) -> Option<i64> {
    case.args.get(index).and_then(Value::as_int)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gantry_core::{discover, run, Filter};

    #[test]
    fn test_sample_suite_discovers_cleanly() {
        let fixtures = discover(&sample_suite()).unwrap();
        let names: Vec<&str> = fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["calculator", "greeting"]);
    }

    #[test]
    fn test_sample_suite_has_no_failures() {
        let fixtures = discover(&sample_suite()).unwrap();
        let report = run(&fixtures, None);
        // 3 addition rows + 2 division rows + guard test + skipped remainder
        // + 2 greeting rows.
        assert_eq!(report.total(), 9);
        assert_eq!(report.passed(), 8);
        assert_eq!(report.skipped(), 1);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_smoke_tag_selects_across_fixtures() {
        let fixtures = discover(&sample_suite()).unwrap();
        let filter = Filter::parse("tag=smoke");
        let report = run(&fixtures, Some(&filter));
        // 3 addition rows + 2 greeting rows.
        assert_eq!(report.total(), 5);
        assert_eq!(report.passed(), 5);
    }

    #[test]
    fn test_divide_guard_message_mentions_zero() {
        let err = divide(7, 0).unwrap_err();
        assert!(err.contains("zero"));
        assert_eq!(divide(7, 7).unwrap(), 1);
    }

    #[test]
    fn test_greet_formats_name() {
        assert_eq!(greet("World"), "Hello, World!");
    }
}
