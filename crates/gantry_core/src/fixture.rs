//! The resolved, immutable description graph.
//!
//! [`crate::discover`] turns declarations into these types exactly once per
//! discovery pass. Execution never mutates them; the runner walks the graph
//! and produces outcomes. Ordering is structural: fixtures in discovery
//! order, units in declaration order, rows in declaration order.

use std::time::Duration;

use crate::decl::{HookFn, TestBody};
use crate::value::Value;

/// Resolved lifecycle hooks for one fixture.
#[derive(Clone, Default)]
pub struct Lifecycle {
    pub setup_once: Option<HookFn>,
    pub teardown_once: Option<HookFn>,
    pub setup_each: Option<HookFn>,
    pub teardown_each: Option<HookFn>,
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Hooks are opaque closures; show only which ones are present.
        f.debug_struct("Lifecycle")
            .field("setup_once", &self.setup_once.is_some())
            .field("teardown_once", &self.teardown_once.is_some())
            .field("setup_each", &self.setup_each.is_some())
            .field("teardown_each", &self.teardown_each.is_some())
            .finish()
    }
}

/// One parameter row of a unit. Non-parameterized units get exactly one
/// implicit row with no arguments.
#[derive(Debug, Clone)]
pub struct Row {
    /// Position within the unit's row list (stable across runs).
    pub index: usize,
    pub args: Vec<Value>,
    pub expected: Option<Value>,
}

/// One test unit: a body plus the rows it runs over.
#[derive(Clone)]
pub struct TestUnit {
    pub name: String,
    pub tags: Vec<String>,
    pub rows: Vec<Row>,
    pub timeout: Option<Duration>,
    pub body: TestBody,
}

impl std::fmt::Debug for TestUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The body is an opaque closure; omit it.
        f.debug_struct("TestUnit")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("rows", &self.rows)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TestUnit {
    /// Number of (unit, row) executions this unit contributes to a run.
    pub fn case_count(&self) -> usize {
        self.rows.len()
    }
}

/// A named group of test units sharing lifecycle hooks. Owns its units.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub name: String,
    pub tags: Vec<String>,
    pub lifecycle: Lifecycle,
    pub units: Vec<TestUnit>,
}

impl Fixture {
    /// Total (unit, row) executions across all units of this fixture.
    pub fn case_count(&self) -> usize {
        self.units.iter().map(TestUnit::case_count).sum()
    }
}
