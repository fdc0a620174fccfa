//! Declarative fixture descriptions supplied by the embedding collaborator.
//!
//! The harness does not define *how* fixtures are declared (attributes,
//! registration macros, config files — an external concern). It only
//! consumes a plain data structure per fixture: a name, an ordered unit
//! list, parameter rows, and a lifecycle descriptor referencing named
//! callable hooks. [`crate::discover`] validates these declarations and
//! resolves them into the immutable [`crate::fixture`] graph.
//!
//! ## Hook references
//!
//! Hooks are registered by name in the declaration's hook table and wired
//! to lifecycle points through [`LifecycleRefs`]. A lifecycle reference
//! naming a hook absent from the table is a discovery-time error, never a
//! runtime surprise.

use std::sync::Arc;
use std::time::Duration;

use crate::value::Value;

/// A callable lifecycle hook.
///
/// Hooks signal failure by returning `Err` with a message; a panic inside a
/// hook is captured by the runner and treated the same way.
pub type HookFn = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// One invocation's view of its parameter row.
#[derive(Debug, Clone, Copy)]
pub struct Case<'a> {
    /// Positional literal arguments for this row (empty for the implicit row).
    pub args: &'a [Value],
    /// Declared expected result, when the row carries one.
    pub expected: Option<&'a Value>,
}

/// The structured signal a test body returns.
///
/// An assertion mismatch carries the expected/actual payload; a deliberate
/// skip is a terminal per-test status, not an error. A panic in the body is
/// captured separately by the runner and normalized to a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum TestSignal {
    Pass,
    Fail {
        expected: String,
        actual: String,
        message: String,
    },
    Skip(String),
}

impl TestSignal {
    /// Build a mismatch failure from displayable expected/actual values.
    pub fn mismatch(expected: impl ToString, actual: impl ToString, message: impl Into<String>) -> Self {
        TestSignal::Fail {
            expected: expected.to_string(),
            actual: actual.to_string(),
            message: message.into(),
        }
    }
}

/// A callable test body.
///
/// `Send + Sync` so a body can be handed to the timeout worker thread; state
/// is shared only through what the closure captures.
pub type TestBody = Arc<dyn Fn(Case<'_>) -> TestSignal + Send + Sync>;

/// One literal parameter row for a unit.
#[derive(Debug, Clone)]
pub struct RowDecl {
    pub args: Vec<Value>,
    pub expected: Option<Value>,
}

impl RowDecl {
    pub fn new(args: Vec<Value>) -> Self {
        Self { args, expected: None }
    }

    pub fn with_expected(args: Vec<Value>, expected: Value) -> Self {
        Self {
            args,
            expected: Some(expected),
        }
    }
}

/// Declaration of one test unit.
#[derive(Clone)]
pub struct UnitDecl {
    pub name: String,
    pub tags: Vec<String>,
    /// Parameter rows; empty means one implicit row with no arguments.
    pub rows: Vec<RowDecl>,
    /// Optional wall-clock budget; on expiry the row is forced to Failed.
    pub timeout: Option<Duration>,
    pub body: TestBody,
}

impl UnitDecl {
    /// Declare a non-parameterized unit.
    pub fn new(name: impl Into<String>, body: impl Fn(Case<'_>) -> TestSignal + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            rows: Vec::new(),
            timeout: None,
            body: Arc::new(body),
        }
    }

    /// Attach parameter rows (declaration order is execution order).
    pub fn with_rows(mut self, rows: Vec<RowDecl>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_timeout(mut self, budget: Duration) -> Self {
        self.timeout = Some(budget);
        self
    }
}

/// Lifecycle descriptor: hook-table references for the four lifecycle points.
#[derive(Debug, Clone, Default)]
pub struct LifecycleRefs {
    /// Runs exactly once before any unit of the fixture.
    pub setup_once: Option<String>,
    /// Runs exactly once after all units, even when setup or units failed.
    pub teardown_once: Option<String>,
    /// Runs immediately before each (unit, row) execution.
    pub setup_each: Option<String>,
    /// Runs immediately after each (unit, row) execution, regardless of result.
    pub teardown_each: Option<String>,
}

/// Declaration of one fixture: a named group of units sharing lifecycle hooks.
#[derive(Clone, Default)]
pub struct FixtureDecl {
    pub name: String,
    pub tags: Vec<String>,
    /// Named callable hooks available to `lifecycle` references.
    pub hooks: Vec<(String, HookFn)>,
    pub lifecycle: LifecycleRefs,
    /// Units in declaration order.
    pub units: Vec<UnitDecl>,
}

impl FixtureDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: UnitDecl) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Register a named hook in the declaration's hook table.
    pub fn with_hook(
        mut self,
        name: impl Into<String>,
        hook: impl Fn() -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.hooks.push((name.into(), Arc::new(hook)));
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleRefs) -> Self {
        self.lifecycle = lifecycle;
        self
    }
}

/// Collaborator that yields fixture declarations in declaration order.
///
/// This is the harness's only input seam: an explicit registration call
/// rather than metadata-driven scanning.
pub trait FixtureSource {
    fn fixtures(&self) -> Vec<FixtureDecl>;
}

/// A plain in-memory source, convenient for embedders and tests.
pub struct StaticSource(pub Vec<FixtureDecl>);

impl FixtureSource for StaticSource {
    fn fixtures(&self) -> Vec<FixtureDecl> {
        self.0.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_decl_builder() {
        let unit = UnitDecl::new("adds", |_| TestSignal::Pass)
            .with_rows(vec![RowDecl::with_expected(
                vec![Value::Int(2), Value::Int(3)],
                Value::Int(5),
            )])
            .with_tag("arith");
        assert_eq!(unit.name, "adds");
        assert_eq!(unit.rows.len(), 1);
        assert_eq!(unit.tags, vec!["arith".to_string()]);
        assert_eq!(unit.rows[0].expected, Some(Value::Int(5)));
    }

    #[test]
    fn test_fixture_decl_builder_registers_hooks() {
        let decl = FixtureDecl::new("calculator")
            .with_hook("init", || Ok(()))
            .with_lifecycle(LifecycleRefs {
                setup_once: Some("init".to_string()),
                ..Default::default()
            })
            .with_unit(UnitDecl::new("noop", |_| TestSignal::Pass));
        assert_eq!(decl.hooks.len(), 1);
        assert_eq!(decl.lifecycle.setup_once.as_deref(), Some("init"));
        assert_eq!(decl.units.len(), 1);
    }

    #[test]
    fn test_mismatch_helper_stringifies() {
        let signal = TestSignal::mismatch(5, 6, "sum mismatch");
        match signal {
            TestSignal::Fail { expected, actual, message } => {
                assert_eq!(expected, "5");
                assert_eq!(actual, "6");
                assert_eq!(message, "sum mismatch");
            }
            other => panic!("expected Fail, got {:?}", other),
        }
    }
}
