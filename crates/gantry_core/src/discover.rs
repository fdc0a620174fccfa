//! Fixture discovery: validate declarations and resolve hook references.
//!
//! Discovery is an explicit registration pass, not metadata scanning: the
//! collaborator hands over plain declarations and this module turns them
//! into the immutable [`Fixture`] graph. All structural problems surface
//! here, before any test executes.

use std::collections::HashSet;

use crate::decl::{FixtureDecl, FixtureSource, HookFn, UnitDecl};
use crate::errors::DiscoveryError;
use crate::fixture::{Fixture, Lifecycle, Row, TestUnit};

/// Validate and resolve all declarations from `source`, in declaration order.
///
/// Fails fast on the first malformed declaration: an empty fixture, a
/// lifecycle reference to a hook absent from the fixture's hook table, or a
/// duplicated fixture/unit name.
#[tracing::instrument(skip_all)]
pub fn discover(source: &dyn FixtureSource) -> Result<Vec<Fixture>, DiscoveryError> {
    let decls = source.fixtures();
    let mut fixtures = Vec::with_capacity(decls.len());
    let mut seen = HashSet::new();

    for decl in decls {
        if !seen.insert(decl.name.clone()) {
            return Err(DiscoveryError::DuplicateFixture { fixture: decl.name });
        }
        fixtures.push(resolve_fixture(decl)?);
    }

    tracing::debug!(fixture_count = fixtures.len(), "discovery complete");
    Ok(fixtures)
}

fn resolve_fixture(decl: FixtureDecl) -> Result<Fixture, DiscoveryError> {
    if decl.units.is_empty() {
        return Err(DiscoveryError::EmptyFixture { fixture: decl.name });
    }

    let lifecycle = Lifecycle {
        setup_once: resolve_hook(&decl, decl.lifecycle.setup_once.as_deref())?,
        teardown_once: resolve_hook(&decl, decl.lifecycle.teardown_once.as_deref())?,
        setup_each: resolve_hook(&decl, decl.lifecycle.setup_each.as_deref())?,
        teardown_each: resolve_hook(&decl, decl.lifecycle.teardown_each.as_deref())?,
    };

    let mut unit_names = HashSet::new();
    let mut units = Vec::with_capacity(decl.units.len());
    for unit in &decl.units {
        if !unit_names.insert(unit.name.clone()) {
            return Err(DiscoveryError::DuplicateUnit {
                fixture: decl.name,
                unit: unit.name.clone(),
            });
        }
        units.push(resolve_unit(unit));
    }

    Ok(Fixture {
        name: decl.name,
        tags: decl.tags,
        lifecycle,
        units,
    })
}

/// Look up a lifecycle reference in the declaration's hook table.
fn resolve_hook(decl: &FixtureDecl, reference: Option<&str>) -> Result<Option<HookFn>, DiscoveryError> {
    let Some(name) = reference else {
        return Ok(None);
    };
    decl.hooks
        .iter()
        .find(|(hook_name, _)| hook_name == name)
        .map(|(_, hook)| Some(hook.clone()))
        .ok_or_else(|| DiscoveryError::UnknownHook {
            fixture: decl.name.clone(),
            hook: name.to_string(),
        })
}

fn resolve_unit(decl: &UnitDecl) -> TestUnit {
    // A unit with no declared rows still executes once: give it the implicit
    // empty row so the runner never special-cases parameterization.
    let rows = if decl.rows.is_empty() {
        vec![Row {
            index: 0,
            args: Vec::new(),
            expected: None,
        }]
    } else {
        decl.rows
            .iter()
            .enumerate()
            .map(|(index, row)| Row {
                index,
                args: row.args.clone(),
                expected: row.expected.clone(),
            })
            .collect()
    };

    TestUnit {
        name: decl.name.clone(),
        tags: decl.tags.clone(),
        rows,
        timeout: decl.timeout,
        body: decl.body.clone(),
    }
}
