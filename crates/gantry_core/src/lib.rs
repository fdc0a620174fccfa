#![forbid(unsafe_code)]
//! Fixture model, discovery and lifecycle execution engine for the gantry test harness.
//!
//! This crate is intentionally small and dependency-light. It contains the deterministic
//! engine that both:
//! - the `gantry` CLI uses to run suites from the command line, and
//! - embedders can drive directly to run fixtures inside their own binaries.
//!
//! ## Notes
//!
//! - This is an "engine core" crate: **no IO**, no global state, no reporting policy.
//!   Rendering and process exit codes live in the `gantry` CLI crate.
//! - The description graph (`Fixture` / `TestUnit` / `Row`) is built once by
//!   [`discover`] and never mutated by execution; [`run`] only produces new
//!   [`Outcome`] / [`RunReport`] values, so repeated runs are reproducible.
//!
//! ## Execution model
//!
//! Sequential, single logical thread of control: per-test setup must complete
//! before the body starts, and teardown must observe the body's terminal state.
//! The only spawned thread is the optional per-unit timeout worker.

pub mod decl;
pub mod discover;
pub mod errors;
pub mod filter;
pub mod fixture;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod value;

pub use decl::{
    Case, FixtureDecl, FixtureSource, HookFn, LifecycleRefs, RowDecl, StaticSource, TestBody, TestSignal, UnitDecl,
};
pub use discover::discover;
pub use errors::DiscoveryError;
pub use filter::Filter;
pub use fixture::{Fixture, Lifecycle, Row, TestUnit};
pub use outcome::{FailureDetail, Outcome, Phase, RunReport, Status};
pub use report::render_summary;
pub use runner::{run, run_with_observer, RunObserver};
pub use value::Value;
