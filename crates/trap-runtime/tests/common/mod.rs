#![allow(dead_code)]
//! Shared helpers for integration tests

use trap_runtime::{Case, Counters, Registry, Reporter, Session};

/// Reporter that renders nothing; for tests that only inspect state.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn run_started(&mut self) {}
    fn entity_started(&mut self, _name: &str) {}
    fn case_finished(&mut self, _entity_name: &str, _case: &Case) {}
    fn run_finished(&mut self, _counters: &Counters) {}
}

/// Run the registry without printing anything, returning the finished session.
pub fn run_silently(registry: Registry) -> Session<SilentReporter> {
    let mut session = Session::with_reporter(registry, SilentReporter);
    session.run();
    session
}
