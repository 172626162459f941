//! Assertion dispatcher: the check/require family
//!
//! `check` failures are recorded and execution continues; `require` failures
//! are recorded and then abort the enclosing case by raising the case-abort
//! signal, which only the engine's per-case boundary swallows. The
//! panic-aware shapes (`*_nothrow`, `*_throws`, `*_throws_as`,
//! `*_throws_with`) capture panics from the supplied action and convert them
//! into pass/fail outcomes; they never let a user panic escape the assertion
//! call, and they never mistake an in-flight case-abort for a user fault.

use std::any::Any;

use crate::fault::{self, Fault};
use crate::location::SourceLocation;
use crate::registry::Counters;
use crate::result::{CaseResult, Failure};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Severity {
    Check,
    Require,
}

impl Severity {
    fn prefix(self) -> &'static str {
        match self {
            Severity::Check => "CHECK",
            Severity::Require => "REQUIRE",
        }
    }
}

/// Handle to the currently executing case.
///
/// The engine passes one of these into each case body. Assertions are
/// methods on it, so an assertion cannot run outside a case's execution
/// window, and failures are attributed without any ambient lookup.
pub struct CaseCtx<'a> {
    result: &'a mut CaseResult,
    counters: &'a mut Counters,
}

impl<'a> CaseCtx<'a> {
    pub(crate) fn new(result: &'a mut CaseResult, counters: &'a mut Counters) -> Self {
        Self { result, counters }
    }

    /// Pass iff `value` is true; a failure is recoverable.
    #[track_caller]
    pub fn check(&mut self, value: bool) {
        self.bool_assert(Severity::Check, value, SourceLocation::caller());
    }

    /// Pass iff `value` is true; a failure aborts the case.
    #[track_caller]
    pub fn require(&mut self, value: bool) {
        self.bool_assert(Severity::Require, value, SourceLocation::caller());
    }

    /// Pass iff `value` is false; a failure is recoverable.
    #[track_caller]
    pub fn check_false(&mut self, value: bool) {
        self.bool_false_assert(Severity::Check, value, SourceLocation::caller());
    }

    /// Pass iff `value` is false; a failure aborts the case.
    #[track_caller]
    pub fn require_false(&mut self, value: bool) {
        self.bool_false_assert(Severity::Require, value, SourceLocation::caller());
    }

    /// Pass iff `action` raises no panic; a failure is recoverable.
    #[track_caller]
    pub fn check_nothrow(&mut self, action: impl FnOnce()) {
        self.nothrow_assert(Severity::Check, action, SourceLocation::caller());
    }

    /// Pass iff `action` raises no panic; a failure aborts the case.
    #[track_caller]
    pub fn require_nothrow(&mut self, action: impl FnOnce()) {
        self.nothrow_assert(Severity::Require, action, SourceLocation::caller());
    }

    /// Pass iff `action` panics; a failure is recoverable.
    #[track_caller]
    pub fn check_throws(&mut self, action: impl FnOnce()) {
        self.throws_assert(Severity::Check, action, SourceLocation::caller());
    }

    /// Pass iff `action` panics; a failure aborts the case.
    #[track_caller]
    pub fn require_throws(&mut self, action: impl FnOnce()) {
        self.throws_assert(Severity::Require, action, SourceLocation::caller());
    }

    /// Pass iff `action` panics with a payload of exactly `K`; a failure is
    /// recoverable.
    #[track_caller]
    pub fn check_throws_as<K: Any>(&mut self, action: impl FnOnce()) {
        self.throws_as_assert::<K>(Severity::Check, action, SourceLocation::caller());
    }

    /// Pass iff `action` panics with a payload of exactly `K`; a failure
    /// aborts the case.
    #[track_caller]
    pub fn require_throws_as<K: Any>(&mut self, action: impl FnOnce()) {
        self.throws_as_assert::<K>(Severity::Require, action, SourceLocation::caller());
    }

    /// Pass iff `action` panics with a message equal to `expected`; a
    /// failure is recoverable. Equality is exact, not substring.
    #[track_caller]
    pub fn check_throws_with(&mut self, action: impl FnOnce(), expected: &str) {
        self.throws_with_assert(Severity::Check, action, expected, SourceLocation::caller());
    }

    /// Pass iff `action` panics with a message equal to `expected`; a
    /// failure aborts the case.
    #[track_caller]
    pub fn require_throws_with(&mut self, action: impl FnOnce(), expected: &str) {
        self.throws_with_assert(Severity::Require, action, expected, SourceLocation::caller());
    }

    fn bool_assert(&mut self, severity: Severity, value: bool, location: SourceLocation) {
        if value {
            self.pass();
        } else {
            self.fail(severity, format!("{}( false )", severity.prefix()), location);
        }
    }

    fn bool_false_assert(&mut self, severity: Severity, value: bool, location: SourceLocation) {
        if !value {
            self.pass();
        } else {
            self.fail(severity, format!("{}_FALSE( true )", severity.prefix()), location);
        }
    }

    fn nothrow_assert(
        &mut self,
        severity: Severity,
        action: impl FnOnce(),
        location: SourceLocation,
    ) {
        match fault::capture(action) {
            None => self.pass(),
            Some(raised) => {
                let message = match raised.description() {
                    Some(text) => format!(
                        "{}_NOTHROW( <panic thrown> )\ndue to unexpected panic with message:\n  {}",
                        severity.prefix(),
                        text
                    ),
                    None => format!(
                        "{}_NOTHROW( <opaque panic thrown> )\ndue to unexpected panic with message:\n  {}",
                        severity.prefix(),
                        fault::OPAQUE_DESCRIPTION
                    ),
                };
                self.fail(severity, message, location);
            }
        }
    }

    fn throws_assert(
        &mut self,
        severity: Severity,
        action: impl FnOnce(),
        location: SourceLocation,
    ) {
        match fault::capture(action) {
            Some(_) => self.pass(),
            None => self.fail(severity, Self::none_raised(severity, "THROWS"), location),
        }
    }

    fn throws_as_assert<K: Any>(
        &mut self,
        severity: Severity,
        action: impl FnOnce(),
        location: SourceLocation,
    ) {
        match fault::capture(action) {
            None => self.fail(severity, Self::none_raised(severity, "THROWS_AS"), location),
            Some(raised) if raised.is::<K>() => self.pass(),
            Some(raised) => {
                let message = format!(
                    "{}_THROWS_AS( <wrong panic type> )\ndue to unexpected panic with message:\n  {}",
                    severity.prefix(),
                    raised.description_or_opaque()
                );
                self.fail(severity, message, location);
            }
        }
    }

    fn throws_with_assert(
        &mut self,
        severity: Severity,
        action: impl FnOnce(),
        expected: &str,
        location: SourceLocation,
    ) {
        match fault::capture(action) {
            None => self.fail(severity, Self::none_raised(severity, "THROWS_WITH"), location),
            Some(raised) => {
                let actual = raised.description_or_opaque();
                if actual == expected {
                    self.pass();
                } else {
                    let message = format!(
                        "{}_THROWS_WITH( \"{}\" )\nwith expected message:\n  \"{}\"",
                        severity.prefix(),
                        actual,
                        expected
                    );
                    self.fail(severity, message, location);
                }
            }
        }
    }

    fn none_raised(severity: Severity, operation: &str) -> String {
        format!(
            "{}_{}( <no panic> )\nbecause no panic was raised where one was expected",
            severity.prefix(),
            operation
        )
    }

    fn pass(&mut self) {
        self.counters.passed_assertions += 1;
    }

    fn fail(&mut self, severity: Severity, message: String, location: SourceLocation) {
        self.counters.failed_assertions += 1;
        self.result.record(Failure::new(message, location));
        if severity == Severity::Require {
            fault::abort_case();
        }
    }
}
