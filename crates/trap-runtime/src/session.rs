//! Execution engine: drives registered cases and tallies outcomes

use std::io;
use std::panic::{self, AssertUnwindSafe};

use crate::assert::CaseCtx;
use crate::fault::{CaseAborted, HookGuard};
use crate::registry::{Counters, Registry};
use crate::reporter::{ConsoleReporter, Reporter};

/// Lifecycle of a session's single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Finished,
}

/// Applies command-line arguments ahead of a run, returning 0 on success.
///
/// Argument handling is an external concern; this collaborator currently
/// accepts every argument list. `Session::run_with_args` only proceeds to
/// the run when it reports success.
pub fn apply_command_line<S: AsRef<str>>(_args: &[S]) -> i32 {
    0
}

/// One run of a populated registry.
///
/// Constructed from a registry that the caller finished populating, consumed
/// by exactly one meaningful `run()`, and readable afterwards for counters
/// and per-case results. The registry is not reset between constructions, so
/// re-running a suite needs a freshly built registry.
pub struct Session<R: Reporter = ConsoleReporter<io::Stdout>> {
    registry: Registry,
    reporter: R,
    state: RunState,
}

impl Session {
    /// A session reporting to stdout
    pub fn new(registry: Registry) -> Self {
        Self::with_reporter(registry, ConsoleReporter::stdout())
    }
}

impl<R: Reporter> Session<R> {
    /// A session with a caller-supplied reporter
    pub fn with_reporter(registry: Registry, reporter: R) -> Self {
        Self {
            registry,
            reporter,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Tallies so far; stable once the run has finished
    pub fn counters(&self) -> Counters {
        self.registry.counters()
    }

    /// The registry, including per-case results after a run
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tear the session apart, yielding the reporter. Useful when the
    /// reporter owns an in-memory buffer.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Apply command-line arguments, then run if they were accepted.
    pub fn run_with_args<S: AsRef<str>>(&mut self, args: &[S]) -> i32 {
        let status = apply_command_line(args);
        if status != 0 {
            return status;
        }
        self.run()
    }

    /// Run every registered case in registration order.
    ///
    /// Per case: `before`, then the body inside a boundary that swallows
    /// exactly the case-abort signal, then `cleanup`. A fatal assertion
    /// therefore stops the rest of its own case and nothing else. Panics
    /// from `before_all`, `before`, `cleanup`, or from case code outside a
    /// panic-aware assertion are not insulated and terminate the run.
    ///
    /// Returns the number of failed cases.
    pub fn run(&mut self) -> i32 {
        let _hook = HookGuard::install();
        self.state = RunState::Running;
        self.reporter.run_started();

        let (entities, counters) = self.registry.split_mut();

        for entity in entities.iter_mut() {
            self.reporter.entity_started(&entity.name);
            (entity.before_all)();

            for case in entity.cases.iter_mut() {
                (case.before)();

                let body = &case.body;
                let boundary = panic::catch_unwind(AssertUnwindSafe(|| {
                    let mut ctx = CaseCtx::new(&mut case.result, &mut *counters);
                    body(&mut ctx);
                }));
                if let Err(payload) = boundary {
                    if !payload.is::<CaseAborted>() {
                        panic::resume_unwind(payload);
                    }
                    // Fatal assertion: the failure is already recorded, the
                    // rest of the case body is skipped, cleanup still runs.
                }
                (case.cleanup)();

                if case.result.passed() {
                    counters.passed_tests += 1;
                } else {
                    counters.failed_tests += 1;
                }
                self.reporter.case_finished(&entity.name, case);
            }
        }

        self.reporter.run_finished(counters);
        self.state = RunState::Finished;
        self.registry.counters.failed_tests as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullReporter;

    impl Reporter for NullReporter {
        fn run_started(&mut self) {}
        fn entity_started(&mut self, _name: &str) {}
        fn case_finished(&mut self, _entity_name: &str, _case: &crate::registry::Case) {}
        fn run_finished(&mut self, _counters: &Counters) {}
    }

    #[test]
    fn test_state_machine() {
        let mut registry = Registry::new();
        registry.register_entity("suite");
        registry.register_case("noop", |_| {}).unwrap();

        let mut session = Session::with_reporter(registry, NullReporter);
        assert_eq!(session.state(), RunState::NotStarted);
        session.run();
        assert_eq!(session.state(), RunState::Finished);
    }

    #[test]
    fn test_run_returns_failed_case_count() {
        let mut registry = Registry::new();
        registry.register_entity("suite");
        registry.register_case("good", |t| t.check(true)).unwrap();
        registry.register_case("bad", |t| t.check(false)).unwrap();
        registry.register_case("worse", |t| t.require(false)).unwrap();

        let mut session = Session::with_reporter(registry, NullReporter);
        assert_eq!(session.run(), 2);
    }

    #[test]
    fn test_run_with_args_delegates_to_command_line() {
        let mut registry = Registry::new();
        registry.register_entity("suite");
        registry.register_case("noop", |t| t.check(true)).unwrap();

        let mut session = Session::with_reporter(registry, NullReporter);
        assert_eq!(session.run_with_args(&["--unused"]), 0);
        assert_eq!(session.state(), RunState::Finished);
    }
}
