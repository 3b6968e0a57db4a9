//! Host capabilities injected into the rotator.
//!
//! The rotator never talks to a concrete display environment. It needs three things from
//! its host, each modelled as a trait so tests can substitute their own:
//!
//! - [`Document`] - query the ordered element set matching a [`Selector`]
//! - [`Element`] - add, remove and test a named class on an element handle
//! - [`Scheduler`] - run a callback repeatedly at a fixed period
//!
//! Concrete implementations live in the submodules: [`memory`] for an in-process element
//! tree, [`scheduler`] for the tokio-backed timer and [`manual`] for a virtual clock.

pub mod manual;
pub mod memory;
pub mod scheduler;
pub mod selector;

use crate::error::{Result, RotatorError};
use std::fmt;
use std::time::Duration;

pub use manual::ManualScheduler;
pub use memory::{ElementRef, MemoryDocument};
pub use scheduler::TokioScheduler;
pub use selector::{Selector, SelectorSubject};

/// Handle to a displayable element supporting a mutable class list.
///
/// Handles are cheap to clone and all clones refer to the same element.
pub trait Element: Clone + Send + Sync + 'static {
    /// Add `class` to the element. Adding a class that is already present is a no-op.
    fn add_class(&self, class: &str);

    /// Remove `class` from the element. Removing a missing class is a no-op.
    fn remove_class(&self, class: &str);

    /// Check whether the element currently carries `class`.
    fn has_class(&self, class: &str) -> bool;
}

/// A queryable tree of elements.
pub trait Document {
    type Element: Element;

    /// Return every element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<Self::Element>;
}

/// Callback invoked on every firing of a repeating timer.
pub type IntervalCallback = Box<dyn FnMut() + Send + 'static>;

/// Repeating-timer primitive.
///
/// Implementations must fire the first time one full `period` after registration and
/// must never run two invocations of the same callback concurrently.
pub trait Scheduler {
    /// Register `callback` to run every `period`. Fails for a zero period.
    fn set_interval(&self, period: Duration, callback: IntervalCallback)
        -> Result<IntervalHandle>;
}

/// Returned by [`Scheduler::set_interval`]; lets the owner stop the timer.
///
/// Dropping the handle leaves the timer running.
pub struct IntervalHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl IntervalHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer. The callback will not be invoked again.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for IntervalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Reject periods a repeating timer cannot honour.
pub(crate) fn ensure_period(period: Duration) -> Result<()> {
    if period.is_zero() {
        return Err(RotatorError::invalid_argument(
            "rotation period must be non-zero",
        ));
    }
    Ok(())
}
