#![forbid(unsafe_code)]
//! gantry — an embeddable test-execution harness.
//!
//! gantry discovers test units grouped into fixtures, runs lifecycle hooks in
//! the documented order, executes each parameter row of a parameterized unit
//! in isolation, and collects pass/fail/skip outcomes without letting one
//! test's failure abort the batch. The engine lives in `gantry_core`; this
//! crate adds the CLI surface and console reporting.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **Tests under execution**: a panic in a test body or hook is *expected
//!   possible input* — the engine captures it and records a Failed outcome.

pub mod cli;

pub use gantry_core::{
    discover, render_summary, run, run_with_observer, Case, DiscoveryError, Filter, Fixture, FixtureDecl,
    FixtureSource, LifecycleRefs, Outcome, RowDecl, RunObserver, RunReport, StaticSource, Status, TestSignal,
    UnitDecl, Value,
};
