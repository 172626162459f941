//! Report rendering: a pure consumer of finished cases and run counters

use std::io::{self, Write};

use crate::registry::{Case, Counters};
use crate::VERSION;

/// Observer for run progress. The engine pushes state in registration
/// order; implementations only render it, so a reporter can be swapped
/// without touching the engine.
pub trait Reporter {
    /// The run is about to execute its first entity.
    fn run_started(&mut self);

    /// A new entity's cases are about to execute.
    fn entity_started(&mut self, name: &str);

    /// A case finished executing; its result is final.
    fn case_finished(&mut self, entity_name: &str, case: &Case);

    /// All entities finished.
    fn run_finished(&mut self, counters: &Counters);
}

const RULE_WIDTH: usize = 79;

/// Renders the canonical plain-text report.
///
/// Passing cases print nothing. The first failing case of an entity prints
/// a banner with the entity's name; each failing case then prints its
/// registration location followed by every failure's location and message.
pub struct ConsoleReporter<W: Write> {
    out: W,
    entity_banner_printed: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entity_banner_printed: false,
        }
    }

    /// Recover the sink, e.g. a buffer holding the rendered report
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self, pattern: &str) {
        let _ = writeln!(self.out, "{}", pattern.repeat(RULE_WIDTH));
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self) {
        self.rule("~");
        let _ = write!(
            self.out,
            "trap v{VERSION} host application.\nRun with -? for options\n\n"
        );
    }

    fn entity_started(&mut self, _name: &str) {
        self.entity_banner_printed = false;
    }

    fn case_finished(&mut self, entity_name: &str, case: &Case) {
        if case.result().passed() {
            return;
        }

        if !self.entity_banner_printed {
            self.rule("-");
            let _ = writeln!(self.out, "{entity_name}");
            self.rule("-");
            self.entity_banner_printed = true;
        }

        let _ = writeln!(self.out, "{}", case.location());
        let _ = write!(self.out, "{}\n\n", ".".repeat(RULE_WIDTH));

        for failure in case.result().failures() {
            let _ = write!(
                self.out,
                "{}: FAILED:\n  {}\n\n",
                failure.location(),
                failure.message()
            );
        }
    }

    fn run_finished(&mut self, counters: &Counters) {
        self.rule("=");

        if counters.failed_assertions == 0 {
            let _ = writeln!(
                self.out,
                "All tests passed ({} assertions in {} test cases)",
                counters.passed_assertions, counters.passed_tests
            );
            return;
        }

        let _ = writeln!(
            self.out,
            "test cases: {} | {} passed | {} failed",
            counters.passed_tests + counters.failed_tests,
            counters.passed_tests,
            counters.failed_tests
        );
        let _ = writeln!(
            self.out,
            "assertions: {} | {} passed | {} failed",
            counters.passed_assertions + counters.failed_assertions,
            counters.passed_assertions,
            counters.failed_assertions
        );
    }
}
