//! Streaming console reporting.
//!
//! ## Reporter Trait
//!
//! The CLI separates reporting from execution through the engine's
//! [`RunObserver`] callbacks plus a final [`Reporter::on_run_complete`].
//! Custom output formats (JSON, TAP, etc.) implement the same pair; the
//! engine stays unaware of any of it.

use gantry_core::{render_summary, Fixture, Outcome, RunObserver, RunReport, Status, TestUnit};

use super::Verbosity;

/// Final-report hook layered on top of the engine's streaming callbacks.
pub trait Reporter: RunObserver {
    /// Called once after the run with the finished report.
    fn on_run_complete(&mut self, report: &RunReport);
}

/// Default console reporter.
///
/// - quiet: summary only
/// - normal: one progress character per outcome (`.`/`F`/`s`), then summary
/// - detailed: one labelled line per outcome with timing, then summary
pub struct ConsoleReporter {
    verbosity: Verbosity,
    printed_progress: bool,
}

impl ConsoleReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            printed_progress: false,
        }
    }
}

impl RunObserver for ConsoleReporter {
    fn on_fixture_start(&mut self, fixture: &Fixture) {
        if self.verbosity == Verbosity::Detailed {
            println!("\x1b[1m{}\x1b[0m", fixture.name);
        }
    }

    fn on_case_start(&mut self, _fixture: &Fixture, _unit: &TestUnit, _row: usize) {}

    fn on_outcome(&mut self, outcome: &Outcome) {
        match self.verbosity {
            Verbosity::Quiet => {}
            Verbosity::Normal => {
                let glyph = match &outcome.status {
                    Status::Passed => "\x1b[32m.\x1b[0m",
                    Status::Failed { .. } => "\x1b[31mF\x1b[0m",
                    Status::Skipped { .. } => "\x1b[33ms\x1b[0m",
                };
                print!("{}", glyph);
                self.printed_progress = true;
            }
            Verbosity::Detailed => {
                let status = match &outcome.status {
                    Status::Passed => format!("\x1b[32mPASSED\x1b[0m ({:.0}ms)", outcome.duration.as_millis()),
                    Status::Failed { message, .. } => {
                        format!("\x1b[31mFAILED\x1b[0m ({})", message)
                    }
                    Status::Skipped { reason } => {
                        if reason.is_empty() {
                            "\x1b[33mSKIPPED\x1b[0m".to_string()
                        } else {
                            format!("\x1b[33mSKIPPED\x1b[0m ({})", reason)
                        }
                    }
                };
                println!("  {} {}", outcome.label(), status);
            }
        }
    }
}

impl Reporter for ConsoleReporter {
    fn on_run_complete(&mut self, report: &RunReport) {
        if self.printed_progress {
            println!();
        }
        print!("{}", render_summary(report));
        if self.verbosity != Verbosity::Quiet {
            println!("Finished in {:.2}s", report.duration.as_secs_f64());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gantry_core::{FixtureDecl, StaticSource, TestSignal, UnitDecl};

    /// Reporters only observe; the report they see must match what `run`
    /// returns.
    struct CountingReporter {
        outcomes_seen: usize,
        fixtures_seen: usize,
    }

    impl RunObserver for CountingReporter {
        fn on_fixture_start(&mut self, _fixture: &Fixture) {
            self.fixtures_seen += 1;
        }

        fn on_outcome(&mut self, _outcome: &Outcome) {
            self.outcomes_seen += 1;
        }
    }

    #[test]
    fn test_observer_sees_every_outcome() {
        let source = StaticSource(vec![
            FixtureDecl::new("a")
                .with_unit(UnitDecl::new("one", |_| TestSignal::Pass))
                .with_unit(UnitDecl::new("two", |_| TestSignal::Pass)),
            FixtureDecl::new("b").with_unit(UnitDecl::new("three", |_| TestSignal::Pass)),
        ]);
        let fixtures = gantry_core::discover(&source).unwrap();

        let mut reporter = CountingReporter {
            outcomes_seen: 0,
            fixtures_seen: 0,
        };
        let report = gantry_core::run_with_observer(&fixtures, None, &mut reporter);

        assert_eq!(reporter.fixtures_seen, 2);
        assert_eq!(reporter.outcomes_seen, report.total());
        assert_eq!(report.total(), 3);
    }
}
