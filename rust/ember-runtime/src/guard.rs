//! Fault guard for the interpreter loop.
//!
//! Builtins report failures as `Value::Error`. A panic raised while running
//! a script is a host defect, and [`Guard::run`] is the last line of defence
//! that turns it into an error value plus a diagnostic instead of tearing
//! down the process.
//!
//! # Policy
//!
//! - **Error values** are for expected failures: bad arguments, bounds,
//!   division by zero, I/O.
//! - **Panics** are for violated invariants in the host integration. They
//!   are caught here and nowhere else.
//!
//! A process-wide panic hook is installed on first use. Inside a guarded
//! scope it records the panic location (and optionally a backtrace) for the
//! diagnostic and prints nothing; outside guarded scopes it defers to the
//! hook that was installed before it.
//!
//! # Example
//!
//! ```rust
//! use ember_runtime::guard::{run_guarded, FaultPolicy};
//! use ember_runtime::Value;
//!
//! let outcome = run_guarded(FaultPolicy::Catch, || panic!("oops"));
//! assert!(!outcome.completed());
//! assert_eq!(outcome.error().unwrap().inspect(), "ERROR: execution fault: oops");
//!
//! let outcome = run_guarded(FaultPolicy::Catch, || Value::Int(42));
//! assert_eq!(outcome.value(), Some(&Value::Int(42)));
//! ```

use ember_core::Value;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::warn;

// ---------------------------------------------------------------------------
// FaultPolicy
// ---------------------------------------------------------------------------

/// What to do when a guarded operation panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaultPolicy {
    /// Return the fault as an [`Outcome`] silently.
    #[serde(rename = "catch")]
    Catch,

    /// Return the fault and emit a `warn` event.
    #[default]
    #[serde(rename = "log")]
    LogAndContinue,

    /// Do not catch; the panic unwinds past the guard. Useful when debugging
    /// the host with a full backtrace.
    #[serde(rename = "propagate")]
    Propagate,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Outcome {
    Completed(Value),
    Faulted { error: Value, diagnostic: String },
}

impl Outcome {
    pub fn completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Completed(v) => Some(v),
            Outcome::Faulted { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Value> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Faulted { error, .. } => Some(error),
        }
    }

    /// Panic message, location and optional backtrace. Empty on success.
    pub fn diagnostic(&self) -> &str {
        match self {
            Outcome::Completed(_) => "",
            Outcome::Faulted { diagnostic, .. } => diagnostic,
        }
    }

    /// The resulting value, or the error value for a fault.
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Completed(v) => v,
            Outcome::Faulted { error, .. } => error,
        }
    }
}

// ---------------------------------------------------------------------------
// Panic hook
// ---------------------------------------------------------------------------

struct FaultSite {
    location: Option<String>,
    backtrace: Option<String>,
}

thread_local! {
    /// `Some(capture_backtrace)` while this thread is inside a guard.
    static ACTIVE: Cell<Option<bool>> = const { Cell::new(None) };
    static LAST_FAULT: RefCell<Option<FaultSite>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| match ACTIVE.with(Cell::get) {
            Some(capture_backtrace) => {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
                let backtrace =
                    capture_backtrace.then(|| Backtrace::force_capture().to_string());
                LAST_FAULT.with(|slot| {
                    *slot.borrow_mut() = Some(FaultSite {
                        location,
                        backtrace,
                    })
                });
            }
            None => previous(info),
        }));
    });
}

/// Marks the current thread as guarded; restores the previous state on drop
/// so nested guards behave.
struct ActiveScope {
    previous: Option<bool>,
}

impl ActiveScope {
    fn enter(capture_backtrace: bool) -> Self {
        let previous = ACTIVE.with(|a| a.replace(Some(capture_backtrace)));
        Self { previous }
    }
}

impl Drop for ActiveScope {
    fn drop(&mut self) {
        ACTIVE.with(|a| a.set(self.previous));
    }
}

/// Extract a human-readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn diagnostic(message: &str, site: Option<FaultSite>) -> String {
    let Some(site) = site else {
        return format!("panicked: {}", message);
    };
    let mut text = match site.location {
        Some(location) => format!("panicked at {}: {}", location, message),
        None => format!("panicked: {}", message),
    };
    if let Some(backtrace) = site.backtrace {
        text.push_str("\nbacktrace:\n");
        text.push_str(&backtrace);
    }
    text
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct Guard {
    policy: FaultPolicy,
    capture_backtrace: bool,
}

impl Guard {
    pub fn new(policy: FaultPolicy) -> Self {
        Self {
            policy,
            capture_backtrace: false,
        }
    }

    pub fn with_backtrace(mut self, capture: bool) -> Self {
        self.capture_backtrace = capture;
        self
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Run `f`, turning a panic into [`Outcome::Faulted`] (unless the policy
    /// is [`FaultPolicy::Propagate`]).
    ///
    /// Values are immutable, so state observed by `f` is not left half
    /// updated by an unwind; the closure is treated as unwind-safe.
    pub fn run<F>(&self, f: F) -> Outcome
    where
        F: FnOnce() -> Value,
    {
        if self.policy == FaultPolicy::Propagate {
            return Outcome::Completed(f());
        }

        install_hook();
        let result = {
            let _scope = ActiveScope::enter(self.capture_backtrace);
            panic::catch_unwind(AssertUnwindSafe(f))
        };

        match result {
            Ok(value) => Outcome::Completed(value),
            Err(payload) => {
                let message = panic_message(&*payload);
                let site = LAST_FAULT.with(|slot| slot.borrow_mut().take());
                let diagnostic = diagnostic(&message, site);
                if self.policy == FaultPolicy::LogAndContinue {
                    warn!(%message, "caught execution fault");
                }
                Outcome::Faulted {
                    error: Value::error(format!("execution fault: {}", message)),
                    diagnostic,
                }
            }
        }
    }
}

/// Run `f` under `policy` without a backtrace.
pub fn run_guarded<F>(policy: FaultPolicy, f: F) -> Outcome
where
    F: FnOnce() -> Value,
{
    Guard::new(policy).run(f)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
