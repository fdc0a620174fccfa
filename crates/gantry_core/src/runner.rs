//! The lifecycle execution engine.
//!
//! ## Guarantees
//!
//! - One-time setup runs exactly once before any unit of its fixture; one-time
//!   teardown runs exactly once after all units, attempted even when setup or
//!   units failed. If one-time setup fails, every selected (unit, row) of the
//!   fixture is recorded Skipped with reason "fixture setup failed".
//! - Per-test setup runs immediately before each (unit, row), per-test
//!   teardown immediately after, regardless of the body's result. Row *i*'s
//!   teardown completes before row *i+1*'s setup begins.
//! - A teardown failure is an *additional* Failed outcome for the same
//!   (unit, row); it never masks the body's own outcome.
//! - Execution order is deterministic: fixtures in discovery order, units in
//!   declaration order, rows in declaration order.
//! - Nothing a single (unit, row) does can abort the run: assertion
//!   mismatches, panics and timeouts are all absorbed into outcomes.
//!
//! ## State machine per (unit, row)
//!
//! `Pending -> Running(setup) -> Running(body) -> Running(teardown)` with a
//! terminal `Passed | Failed | Skipped`; a transition to `Failed` can happen
//! in any running phase, and the phase is recorded on the outcome.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::decl::{Case, HookFn, TestBody, TestSignal};
use crate::filter::Filter;
use crate::fixture::{Fixture, Row, TestUnit};
use crate::outcome::{FailureDetail, Outcome, Phase, RunReport, Status};

/// Observer hooks for streaming reporters.
///
/// Implement this to render progress while the run is in flight; the engine
/// itself stays reporting-free. All methods default to no-ops.
pub trait RunObserver {
    fn on_fixture_start(&mut self, _fixture: &Fixture) {}
    fn on_case_start(&mut self, _fixture: &Fixture, _unit: &TestUnit, _row: usize) {}
    fn on_outcome(&mut self, _outcome: &Outcome) {}
}

struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Execute fixtures to completion and collect the run report.
pub fn run(fixtures: &[Fixture], filter: Option<&Filter>) -> RunReport {
    run_with_observer(fixtures, filter, &mut NoopObserver)
}

/// [`run`], with observer callbacks for streaming reporters.
#[tracing::instrument(skip_all, fields(fixture_count = fixtures.len()))]
pub fn run_with_observer(
    fixtures: &[Fixture],
    filter: Option<&Filter>,
    observer: &mut dyn RunObserver,
) -> RunReport {
    let run_start = Instant::now();
    let mut outcomes = Vec::new();

    for fixture in fixtures {
        let selected: Vec<&TestUnit> = fixture
            .units
            .iter()
            .filter(|unit| filter.is_none_or(|f| f.matches(fixture, unit)))
            .collect();

        // A fixture with no selected units is not set up at all.
        if selected.is_empty() {
            continue;
        }

        observer.on_fixture_start(fixture);
        run_fixture(fixture, &selected, observer, &mut outcomes);
    }

    let report = RunReport {
        outcomes,
        duration: run_start.elapsed(),
    };
    tracing::debug!(
        passed = report.passed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "run complete"
    );
    report
}

fn run_fixture(
    fixture: &Fixture,
    selected: &[&TestUnit],
    observer: &mut dyn RunObserver,
    outcomes: &mut Vec<Outcome>,
) {
    if let Some(setup) = &fixture.lifecycle.setup_once {
        if let Err(message) = call_hook(setup) {
            tracing::warn!(fixture = %fixture.name, %message, "one-time setup failed");
            skip_all_cases(fixture, selected, observer, outcomes);
            run_teardown_once(fixture, observer, outcomes);
            return;
        }
    }

    for unit in selected {
        for row in &unit.rows {
            run_case(fixture, unit, row, observer, outcomes);
        }
    }

    run_teardown_once(fixture, observer, outcomes);
}

/// One-time setup failed: every selected (unit, row) is recorded Skipped.
fn skip_all_cases(
    fixture: &Fixture,
    selected: &[&TestUnit],
    observer: &mut dyn RunObserver,
    outcomes: &mut Vec<Outcome>,
) {
    for unit in selected {
        for row in &unit.rows {
            record(
                outcomes,
                observer,
                Outcome {
                    fixture: fixture.name.clone(),
                    unit: Some(unit.name.clone()),
                    row: row.index,
                    phase: Phase::FixtureSetup,
                    status: Status::Skipped {
                        reason: "fixture setup failed".to_string(),
                    },
                    duration: Duration::ZERO,
                },
            );
        }
    }
}

/// One-time teardown is attempted exactly once per executed fixture; a
/// failure is a fixture-level Failed outcome and does not abort the run.
fn run_teardown_once(fixture: &Fixture, observer: &mut dyn RunObserver, outcomes: &mut Vec<Outcome>) {
    let Some(teardown) = &fixture.lifecycle.teardown_once else {
        return;
    };
    let start = Instant::now();
    if let Err(message) = call_hook(teardown) {
        tracing::warn!(fixture = %fixture.name, %message, "one-time teardown failed");
        record(
            outcomes,
            observer,
            Outcome {
                fixture: fixture.name.clone(),
                unit: None,
                row: 0,
                phase: Phase::FixtureTeardown,
                status: Status::Failed {
                    message: format!("one-time teardown failed: {}", message),
                    detail: None,
                },
                duration: start.elapsed(),
            },
        );
    }
}

fn run_case(
    fixture: &Fixture,
    unit: &TestUnit,
    row: &Row,
    observer: &mut dyn RunObserver,
    outcomes: &mut Vec<Outcome>,
) {
    observer.on_case_start(fixture, unit, row.index);

    if let Some(setup) = &fixture.lifecycle.setup_each {
        let start = Instant::now();
        if let Err(message) = call_hook(setup) {
            record(
                outcomes,
                observer,
                case_outcome(
                    fixture,
                    unit,
                    row,
                    Phase::Setup,
                    Status::Failed {
                        message: format!("setup failed: {}", message),
                        detail: None,
                    },
                    start.elapsed(),
                ),
            );
            // The body does not run, but teardown is still attempted so the
            // hook pair stays balanced for state the setup may have touched.
            run_teardown_each(fixture, unit, row, observer, outcomes);
            return;
        }
    }

    let body_start = Instant::now();
    let status = execute_body(unit, row);
    record(
        outcomes,
        observer,
        case_outcome(fixture, unit, row, Phase::Body, status, body_start.elapsed()),
    );

    run_teardown_each(fixture, unit, row, observer, outcomes);
}

fn run_teardown_each(
    fixture: &Fixture,
    unit: &TestUnit,
    row: &Row,
    observer: &mut dyn RunObserver,
    outcomes: &mut Vec<Outcome>,
) {
    let Some(teardown) = &fixture.lifecycle.teardown_each else {
        return;
    };
    let start = Instant::now();
    if let Err(message) = call_hook(teardown) {
        record(
            outcomes,
            observer,
            case_outcome(
                fixture,
                unit,
                row,
                Phase::Teardown,
                Status::Failed {
                    message: format!("teardown failed: {}", message),
                    detail: None,
                },
                start.elapsed(),
            ),
        );
    }
}

fn case_outcome(
    fixture: &Fixture,
    unit: &TestUnit,
    row: &Row,
    phase: Phase,
    status: Status,
    duration: Duration,
) -> Outcome {
    Outcome {
        fixture: fixture.name.clone(),
        unit: Some(unit.name.clone()),
        row: row.index,
        phase,
        status,
        duration,
    }
}

fn record(outcomes: &mut Vec<Outcome>, observer: &mut dyn RunObserver, outcome: Outcome) {
    observer.on_outcome(&outcome);
    outcomes.push(outcome);
}

// ============================================================================
// Body execution
// ============================================================================

fn execute_body(unit: &TestUnit, row: &Row) -> Status {
    match unit.timeout {
        Some(budget) => execute_body_with_budget(unit, row, budget),
        None => signal_to_status(catch_body(&unit.body, row)),
    }
}

/// Run the body on a worker thread and force a Failed outcome when the
/// wall-clock budget elapses. The worker is detached; a late result is
/// dropped with its channel.
fn execute_body_with_budget(unit: &TestUnit, row: &Row, budget: Duration) -> Status {
    let body = unit.body.clone();
    let worker_row = row.clone();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name(format!("gantry-case-{}", unit.name))
        .spawn(move || {
            let _ = tx.send(catch_body(&body, &worker_row));
        });

    if let Err(e) = spawned {
        return Status::Failed {
            message: format!("failed to spawn timeout worker: {}", e),
            detail: None,
        };
    }

    match rx.recv_timeout(budget) {
        Ok(result) => signal_to_status(result),
        Err(_) => Status::Failed {
            message: "timed out".to_string(),
            detail: None,
        },
    }
}

/// Invoke the body with panic capture. `Err` carries the panic payload text.
fn catch_body(body: &TestBody, row: &Row) -> Result<TestSignal, String> {
    let case = Case {
        args: &row.args,
        expected: row.expected.as_ref(),
    };
    panic::catch_unwind(AssertUnwindSafe(|| body(case))).map_err(|payload| panic_message(payload.as_ref()))
}

/// Normalize the body's signal (or captured panic) to a terminal status.
fn signal_to_status(result: Result<TestSignal, String>) -> Status {
    match result {
        Ok(TestSignal::Pass) => Status::Passed,
        Ok(TestSignal::Fail {
            expected,
            actual,
            message,
        }) => Status::Failed {
            message,
            detail: Some(FailureDetail::Mismatch { expected, actual }),
        },
        Ok(TestSignal::Skip(reason)) => Status::Skipped { reason },
        Err(payload) => Status::Failed {
            message: payload.clone(),
            detail: Some(FailureDetail::Panic { payload }),
        },
    }
}

/// Invoke a hook with panic capture; both `Err` returns and panics surface
/// as hook failure messages.
fn call_hook(hook: &HookFn) -> Result<(), String> {
    panic::catch_unwind(AssertUnwindSafe(|| hook()))
        .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
