//! Virtual-time scheduler for driving timers deterministically.
//!
//! Nothing fires until [`ManualScheduler::advance`] moves the clock. Firings are replayed
//! in chronological order (ties broken by registration order), one callback at a time.

use crate::error::Result;
use crate::host::{ensure_period, IntervalCallback, IntervalHandle, Scheduler};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

struct ManualTimer {
    id: u64,
    period: Duration,
    next_due: Duration,
    callback: IntervalCallback,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
    /// Ids cancelled while their timer was checked out for a firing
    cancelled: HashSet<u64>,
}

impl ManualClock {
    /// Remove and return the earliest timer due at or before `deadline`.
    fn take_due(&mut self, deadline: Duration) -> Option<ManualTimer> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.next_due <= deadline)
            .min_by_key(|(_, timer)| (timer.next_due, timer.id))
            .map(|(idx, _)| idx)?;
        Some(self.timers.remove(idx))
    }
}

/// Scheduler whose clock only moves when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of registered, uncancelled timers.
    pub fn active_timers(&self) -> usize {
        self.clock.lock().timers.len()
    }

    /// Move the clock forward by `by`, firing every callback that falls due. The clock
    /// saturates at `Duration::MAX`; a timer that would next fire beyond it is dropped.
    ///
    /// Returns the number of callback invocations. The lock is released while a callback
    /// runs, so callbacks may register or cancel timers.
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.clock.lock().now.saturating_add(by);
        let mut fired = 0;

        loop {
            let Some(mut timer) = ({
                let mut clock = self.clock.lock();
                let due = clock.take_due(deadline);
                if let Some(timer) = &due {
                    clock.now = timer.next_due;
                }
                due
            }) else {
                break;
            };

            (timer.callback)();
            fired += 1;

            let mut clock = self.clock.lock();
            if clock.cancelled.remove(&timer.id) {
                continue;
            }
            // A timer whose next firing lies past `Duration::MAX` is retired
            match timer.next_due.checked_add(timer.period) {
                Some(next_due) => {
                    timer.next_due = next_due;
                    clock.timers.push(timer);
                }
                None => log::debug!("manual timer {} retired at the end of the clock", timer.id),
            }
        }

        self.clock.lock().now = deadline;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> Result<IntervalHandle> {
        ensure_period(period)?;

        let mut clock = self.clock.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let next_due = clock.now.saturating_add(period);
        clock.timers.push(ManualTimer {
            id,
            period,
            next_due,
            callback,
        });

        let weak = Arc::downgrade(&self.clock);
        Ok(IntervalHandle::new(move || {
            if let Some(clock) = weak.upgrade() {
                let mut clock = clock.lock();
                let before = clock.timers.len();
                clock.timers.retain(|timer| timer.id != id);
                if clock.timers.len() == before {
                    // Checked out by a firing in progress (or already gone)
                    clock.cancelled.insert(id);
                }
            }
        }))
    }
}
