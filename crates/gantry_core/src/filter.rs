//! Run filters: restrict execution by name pattern or tag.
//!
//! The CLI surface accepts `--filter <namePattern|tag=value>`; a bare
//! pattern matches by substring against the fixture name, the unit name and
//! the qualified `fixture.unit` path, while `tag=value` selects units (or
//! whole fixtures) carrying that tag.

use crate::fixture::{Fixture, TestUnit};

/// A parsed unit-selection predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Substring match over fixture/unit names.
    Name(String),
    /// Exact match over fixture/unit tags.
    Tag(String),
}

impl Filter {
    /// Parse the CLI filter grammar: `tag=value` selects by tag, anything
    /// else is a name pattern.
    pub fn parse(raw: &str) -> Filter {
        match raw.strip_prefix("tag=") {
            Some(tag) => Filter::Tag(tag.to_string()),
            None => Filter::Name(raw.to_string()),
        }
    }

    /// Decide whether a (fixture, unit) pair is selected for execution.
    pub fn matches(&self, fixture: &Fixture, unit: &TestUnit) -> bool {
        match self {
            Filter::Name(pattern) => {
                let qualified = format!("{}.{}", fixture.name, unit.name);
                fixture.name.contains(pattern) || unit.name.contains(pattern) || qualified.contains(pattern)
            }
            Filter::Tag(tag) => fixture.tags.iter().any(|t| t == tag) || unit.tags.iter().any(|t| t == tag),
        }
    }
}
