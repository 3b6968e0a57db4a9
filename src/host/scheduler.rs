//! Tokio-backed repeating timer.

use crate::error::{Result, RotatorError};
use crate::host::{ensure_period, IntervalCallback, IntervalHandle, Scheduler};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Runs each interval as its own task on a tokio runtime.
///
/// A single task owns the callback, so invocations never overlap. Late ticks are delayed
/// rather than replayed in a burst.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Bind to the runtime of the calling context.
    pub fn current() -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|err| RotatorError::other(format!("no tokio runtime available: {}", err)))?;
        Ok(Self { runtime })
    }
}

impl Scheduler for TokioScheduler {
    fn set_interval(
        &self,
        period: Duration,
        mut callback: IntervalCallback,
    ) -> Result<IntervalHandle> {
        ensure_period(period)?;

        // First firing one full period from registration, like a host `setInterval`.
        let first = Instant::now() + period;
        let task = self.runtime.spawn(async move {
            let mut ticker = time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        log::debug!("interval registered with period {:?}", period);

        Ok(IntervalHandle::new(move || {
            task.abort();
            log::debug!("interval cancelled");
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_callback() -> (Arc<AtomicUsize>, IntervalCallback) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (
            count,
            Box::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn first_firing_waits_a_full_period() {
        let scheduler = TokioScheduler::current().unwrap();
        let (count, callback) = counting_callback();
        let _handle = scheduler
            .set_interval(Duration::from_millis(4000), callback)
            .unwrap();

        time::sleep(Duration::from_millis(3999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_millis(8000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_interval_stops_firing() {
        let scheduler = TokioScheduler::current().unwrap();
        let (count, callback) = counting_callback();
        let handle = scheduler
            .set_interval(Duration::from_millis(100), callback)
            .unwrap();

        time::sleep(Duration::from_millis(250)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        handle.cancel();
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_period_is_an_error() {
        let scheduler = TokioScheduler::current().unwrap();
        let (_count, callback) = counting_callback();
        let err = scheduler
            .set_interval(Duration::ZERO, callback)
            .unwrap_err();
        assert!(matches!(err, RotatorError::InvalidArgument { .. }));
    }

    #[test]
    fn current_fails_outside_a_runtime() {
        assert!(TokioScheduler::current().is_err());
    }
}
