//! Test registry: ordered entities, their cases, and run counters
//!
//! The registry is an explicit value, not process-wide state: callers
//! construct one, populate it during a single-threaded registration phase,
//! and hand it to a `Session` for exactly one run. It is never reset.

use serde::Serialize;
use thiserror::Error;

use crate::assert::CaseCtx;
use crate::location::SourceLocation;
use crate::result::CaseResult;

/// Registration errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no entity is current; register an entity before registering cases")]
    NoCurrentEntity,
}

pub(crate) type Hook = Box<dyn Fn()>;
pub(crate) type CaseBody = Box<dyn Fn(&mut CaseCtx<'_>)>;

fn noop_hook() -> Hook {
    Box::new(|| {})
}

/// One executable test scenario, owning its accumulated result.
pub struct Case {
    pub(crate) name: String,
    pub(crate) location: SourceLocation,
    pub(crate) before: Hook,
    pub(crate) body: CaseBody,
    pub(crate) cleanup: Hook,
    pub(crate) result: CaseResult,
}

impl Case {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the case was registered
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn result(&self) -> &CaseResult {
        &self.result
    }
}

/// A named grouping of cases (a suite). Registration order is run order.
pub struct Entity {
    pub(crate) name: String,
    pub(crate) before_all: Hook,
    pub(crate) cases: Vec<Case>,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }
}

/// Pass/fail tallies across a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub passed_assertions: u32,
    pub failed_assertions: u32,
}

/// Proof that an entity registration ran. Carries no further API; its only
/// contract is that it exists once the registration side effect happened.
#[derive(Debug, Clone, Copy)]
pub struct EntityToken(pub(crate) ());

/// Optional per-case lifecycle hooks.
///
/// `before` runs ahead of the case body, `cleanup` runs after the body
/// finishes normally or via a fatal-assertion abort. Both default to no-ops.
#[derive(Default)]
pub struct CaseHooks {
    before: Option<Hook>,
    cleanup: Option<Hook>,
}

impl CaseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(mut self, hook: impl Fn() + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn cleanup(mut self, hook: impl Fn() + 'static) -> Self {
        self.cleanup = Some(Box::new(hook));
        self
    }
}

/// Ordered collection of entities plus run counters.
///
/// Cases are appended to the most recently registered entity; execution
/// preserves registration order at both granularities. No reordering,
/// filtering, or deduplication.
#[derive(Default)]
pub struct Registry {
    pub(crate) entities: Vec<Entity>,
    current_entity: Option<usize>,
    pub(crate) counters: Counters,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entity and make it current for case registration.
    pub fn register_entity(&mut self, name: impl Into<String>) -> EntityToken {
        self.register_entity_with(name, || {})
    }

    /// Append a new entity with a `before_all` hook that runs once before
    /// any of its cases.
    pub fn register_entity_with(
        &mut self,
        name: impl Into<String>,
        before_all: impl Fn() + 'static,
    ) -> EntityToken {
        self.entities.push(Entity {
            name: name.into(),
            before_all: Box::new(before_all),
            cases: Vec::new(),
        });
        self.current_entity = Some(self.entities.len() - 1);
        EntityToken(())
    }

    /// Append a case to the current entity. The declaration location is the
    /// call site.
    #[track_caller]
    pub fn register_case(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&mut CaseCtx<'_>) + 'static,
    ) -> Result<(), RegistryError> {
        self.register_case_at(name, CaseHooks::new(), Box::new(body), SourceLocation::caller())
    }

    /// Append a case with explicit `before`/`cleanup` hooks.
    #[track_caller]
    pub fn register_case_with(
        &mut self,
        name: impl Into<String>,
        hooks: CaseHooks,
        body: impl Fn(&mut CaseCtx<'_>) + 'static,
    ) -> Result<(), RegistryError> {
        self.register_case_at(name, hooks, Box::new(body), SourceLocation::caller())
    }

    fn register_case_at(
        &mut self,
        name: impl Into<String>,
        hooks: CaseHooks,
        body: CaseBody,
        location: SourceLocation,
    ) -> Result<(), RegistryError> {
        let current = self.current_entity.ok_or(RegistryError::NoCurrentEntity)?;
        self.entities[current].cases.push(Case {
            name: name.into(),
            location,
            before: hooks.before.unwrap_or_else(noop_hook),
            body,
            cleanup: hooks.cleanup.unwrap_or_else(noop_hook),
            result: CaseResult::default(),
        });
        Ok(())
    }

    /// Entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Split borrow for the engine: cases and counters are mutated
    /// side by side while a run is in progress.
    pub(crate) fn split_mut(&mut self) -> (&mut [Entity], &mut Counters) {
        (&mut self.entities, &mut self.counters)
    }

    /// Current tallies; stable once the run has finished
    pub fn counters(&self) -> Counters {
        self.counters
    }
}
