//! Panic capture and classification
//!
//! A "fault" is an unwinding panic raised by user code. A recognized fault
//! carries message text (the `&str`/`String` payloads `panic!` produces);
//! anything else raised through `panic_any` is opaque. The case-abort signal
//! raised by a fatal assertion is neither: it is a private marker payload
//! that every capture site re-raises untouched, so only the engine's
//! per-case boundary ever swallows it.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Arc;

/// Marker payload raised by a fatal assertion to abort the current case.
pub(crate) struct CaseAborted;

/// Text substituted for a payload that carries no message
pub(crate) const OPAQUE_DESCRIPTION: &str = "Unknown exception";

/// A captured unwinding panic from user code.
pub(crate) struct Fault {
    payload: Box<dyn Any + Send>,
}

impl Fault {
    /// The payload's message, if it carries one
    pub(crate) fn description(&self) -> Option<&str> {
        if let Some(s) = self.payload.downcast_ref::<&'static str>() {
            Some(s)
        } else if let Some(s) = self.payload.downcast_ref::<String>() {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// Message text for reports; opaque payloads render a fixed placeholder
    pub(crate) fn description_or_opaque(&self) -> &str {
        self.description().unwrap_or(OPAQUE_DESCRIPTION)
    }

    /// Whether the payload is exactly `K`
    pub(crate) fn is<K: Any>(&self) -> bool {
        self.payload.is::<K>()
    }
}

thread_local! {
    static EXPECTED_UNWIND_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// While alive, panics on this thread are expected and the run's panic hook
/// stays quiet. The guard is still on the stack when the hook fires and is
/// dropped as the unwind passes it.
struct ExpectedUnwind;

impl ExpectedUnwind {
    fn enter() -> Self {
        EXPECTED_UNWIND_DEPTH.with(|d| d.set(d.get() + 1));
        ExpectedUnwind
    }
}

impl Drop for ExpectedUnwind {
    fn drop(&mut self) {
        EXPECTED_UNWIND_DEPTH.with(|d| d.set(d.get() - 1));
    }
}

fn unwind_expected() -> bool {
    EXPECTED_UNWIND_DEPTH.with(|d| d.get() > 0)
}

/// Run `action`, capturing any panic it raises.
///
/// Returns `None` when the action returns normally. An in-flight case-abort
/// is never captured; it propagates to the engine's case boundary.
pub(crate) fn capture<F: FnOnce()>(action: F) -> Option<Fault> {
    let _expected = ExpectedUnwind::enter();
    match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(()) => None,
        Err(payload) => {
            if payload.is::<CaseAborted>() {
                panic::resume_unwind(payload);
            }
            Some(Fault { payload })
        }
    }
}

/// Raise the case-abort signal.
pub(crate) fn abort_case() -> ! {
    // The guard is alive when the hook observes this panic, so nothing is
    // printed; it is dropped as the unwind leaves this frame.
    let _expected = ExpectedUnwind::enter();
    panic::panic_any(CaseAborted);
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send>;

/// Silences expected panics for the duration of a run.
///
/// Captured faults and case-aborts unwind routinely while a session runs;
/// without this the default hook would print a backtrace banner for each.
/// Unexpected panics are delegated to the previously installed hook, and
/// that hook is restored when the guard drops.
pub(crate) struct HookGuard {
    prev: Arc<PanicHook>,
}

impl HookGuard {
    pub(crate) fn install() -> Self {
        let prev: Arc<PanicHook> = Arc::new(panic::take_hook());
        let delegate = Arc::clone(&prev);
        panic::set_hook(Box::new(move |info| {
            if !unwind_expected() {
                (*delegate)(info);
            }
        }));
        HookGuard { prev }
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        // set_hook panics on a panicking thread; when an uninsulated fault is
        // unwinding out of the run the hook has already reported it and the
        // process is on its way down, so leave the silencer in place.
        if std::thread::panicking() {
            return;
        }
        let prev = Arc::clone(&self.prev);
        let _ = panic::take_hook();
        panic::set_hook(Box::new(move |info| (*prev)(info)));
    }
}
