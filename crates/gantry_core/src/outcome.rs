//! Outcomes and the run report.
//!
//! One [`Outcome`] per (unit, row) execution, plus an extra Failed outcome
//! when a teardown fails after the body already produced its result. All of
//! these are immutable once produced; the report derives its aggregate
//! counts from the outcome sequence.

use std::time::Duration;

/// Lifecycle phase in which an outcome was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One-time fixture setup.
    FixtureSetup,
    /// One-time fixture teardown.
    FixtureTeardown,
    /// Per-test setup.
    Setup,
    /// The test body itself.
    Body,
    /// Per-test teardown.
    Teardown,
}

/// Structured payload distinguishing an assertion mismatch from a captured panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    /// The assertion collaborator reported expected/actual values.
    Mismatch { expected: String, actual: String },
    /// The body (or a hook) panicked; the payload message was captured.
    Panic { payload: String },
}

/// Terminal status of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Passed,
    Failed {
        message: String,
        detail: Option<FailureDetail>,
    },
    Skipped {
        reason: String,
    },
}

impl Status {
    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed { .. })
    }
}

/// Result of running one (unit, row) pair, or a fixture-level hook failure.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub fixture: String,
    /// `None` for fixture-level outcomes (one-time hook failures).
    pub unit: Option<String>,
    /// Row index within the unit; 0 for fixture-level outcomes.
    pub row: usize,
    pub phase: Phase,
    pub status: Status,
    pub duration: Duration,
}

impl Outcome {
    /// Qualified `fixture.unit[row]` label used in failure reporting.
    pub fn label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{}.{}[{}]", self.fixture, unit, self.row),
            None => self.fixture.clone(),
        }
    }
}

/// Ordered outcomes plus aggregate counts and wall-clock duration for one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
    pub duration: Duration,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, Status::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, Status::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, Status::Skipped { .. }))
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// True when at least one Failed outcome was recorded; drives the
    /// process exit code.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status.is_failed())
    }

    fn count(&self, pred: impl Fn(&Status) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
