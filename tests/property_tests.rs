//! Property-based tests for the harness engine
//!
//! These tests use proptest to verify run invariants across many randomly
//! generated suite shapes, catching edge cases that hand-written tests might
//! miss.

use proptest::prelude::*;

use gantry::{discover, run, Case, FixtureDecl, RowDecl, StaticSource, Status, TestSignal, UnitDecl, Value};

/// Deterministic body driven by a small status code: 0 pass, 1 fail, 2 skip.
fn body_for(code: u8) -> impl Fn(Case<'_>) -> TestSignal + Send + Sync + 'static {
    move |_| match code {
        0 => TestSignal::Pass,
        1 => TestSignal::mismatch(0, 1, "forced mismatch"),
        _ => TestSignal::Skip("generated".to_string()),
    }
}

/// Build one fixture whose units take their row counts (0 = non-parameterized)
/// and status codes from the generated shape.
fn build_fixture(shape: &[(usize, u8)]) -> StaticSource {
    let mut fixture = FixtureDecl::new("generated");
    for (i, (row_count, code)) in shape.iter().enumerate() {
        let mut unit = UnitDecl::new(format!("unit_{}", i), body_for(*code));
        if *row_count > 0 {
            unit = unit.with_rows(
                (0..*row_count)
                    .map(|r| RowDecl::new(vec![Value::Int(r as i64)]))
                    .collect(),
            );
        }
        fixture = fixture.with_unit(unit);
    }
    StaticSource(vec![fixture])
}

proptest! {
    /// Property: outcome count equals the number of declared (unit, row)
    /// executions, regardless of pass/fail/skip mix. No hook is declared, so
    /// failures can neither remove nor duplicate outcomes.
    #[test]
    fn outcome_count_matches_declared_cases(shape in prop::collection::vec((0usize..4, 0u8..3), 1..8)) {
        let fixtures = discover(&build_fixture(&shape)).unwrap();
        let report = run(&fixtures, None);

        let expected: usize = shape
            .iter()
            .map(|(rows, _)| if *rows == 0 { 1 } else { *rows })
            .sum();
        prop_assert_eq!(report.total(), expected);
    }

    /// Property: two runs over the same fixtures produce identical outcome
    /// sequences (same status and same label per position).
    #[test]
    fn runs_are_idempotent(shape in prop::collection::vec((0usize..4, 0u8..3), 1..8)) {
        let fixtures = discover(&build_fixture(&shape)).unwrap();
        let first = run(&fixtures, None);
        let second = run(&fixtures, None);

        prop_assert_eq!(first.total(), second.total());
        for (a, b) in first.outcomes.iter().zip(second.outcomes.iter()) {
            prop_assert_eq!(&a.status, &b.status);
            prop_assert_eq!(a.label(), b.label());
        }
    }

    /// Property: outcomes appear in declaration order - units in order, rows
    /// in row order within each unit.
    #[test]
    fn outcomes_follow_declaration_order(shape in prop::collection::vec((0usize..4, 0u8..1), 1..8)) {
        let fixtures = discover(&build_fixture(&shape)).unwrap();
        let report = run(&fixtures, None);

        let mut expected_labels = Vec::new();
        for (i, (row_count, _)) in shape.iter().enumerate() {
            let rows = if *row_count == 0 { 1 } else { *row_count };
            for r in 0..rows {
                expected_labels.push(format!("generated.unit_{}[{}]", i, r));
            }
        }
        let labels: Vec<String> = report.outcomes.iter().map(|o| o.label()).collect();
        prop_assert_eq!(labels, expected_labels);
    }

    /// Property: aggregate counts always partition the outcome sequence.
    #[test]
    fn counts_partition_total(shape in prop::collection::vec((0usize..4, 0u8..3), 1..8)) {
        let fixtures = discover(&build_fixture(&shape)).unwrap();
        let report = run(&fixtures, None);
        prop_assert_eq!(report.passed() + report.failed() + report.skipped(), report.total());
        prop_assert_eq!(
            report.has_failures(),
            report.outcomes.iter().any(|o| matches!(o.status, Status::Failed { .. }))
        );
    }
}
