//! Discovery-time errors.
//!
//! A malformed fixture declaration is fatal: it aborts the run before any
//! test executes and names the offending fixture. Everything that can go
//! wrong *during* execution (hook failures, assertion mismatches, panics,
//! timeouts) is absorbed into the run report instead.

use thiserror::Error;

/// Errors raised while validating fixture declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("fixture '{fixture}' declares zero test units")]
    EmptyFixture { fixture: String },

    #[error("fixture '{fixture}' references unknown hook '{hook}'")]
    UnknownHook { fixture: String, hook: String },

    #[error("duplicate fixture name '{fixture}'")]
    DuplicateFixture { fixture: String },

    #[error("unit '{unit}' declared twice in fixture '{fixture}'")]
    DuplicateUnit { fixture: String, unit: String },
}

impl DiscoveryError {
    /// Name of the fixture the error points at.
    pub fn fixture(&self) -> &str {
        match self {
            DiscoveryError::EmptyFixture { fixture }
            | DiscoveryError::UnknownHook { fixture, .. }
            | DiscoveryError::DuplicateFixture { fixture }
            | DiscoveryError::DuplicateUnit { fixture, .. } => fixture,
        }
    }
}
