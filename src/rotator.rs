//! The banner rotator.
//!
//! A [`Rotator`] owns its [`BannerSet`] and the index of the active banner. Each firing of
//! its timer moves the active marker one step forward, wrapping at the end of the set:
//!
//! 1. remove the marker from the banner at the current index
//! 2. advance the index modulo the set length
//! 3. add the marker to the new banner
//!
//! The rotator is moved into its timer callback on [`Rotator::start`], so the index has a
//! single writer for the whole lifetime of the rotation.

use crate::banner::BannerSet;
use crate::error::Result;
use crate::host::{Element, IntervalHandle, Scheduler};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Class toggled on the active banner unless overridden.
pub const DEFAULT_MARKER: &str = "active";

/// Period between transitions unless overridden.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(4000);

/// One completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    /// 1-based count of transitions performed so far
    pub tick: u64,
    pub previous: usize,
    pub current: usize,
}

/// Timer-driven rotation of an active marker across a banner set.
pub struct Rotator<E> {
    banners: BannerSet<E>,
    current: usize,
    ticks: u64,
    marker: String,
    observer: Option<UnboundedSender<Rotation>>,
}

impl<E: Element> Rotator<E> {
    /// Create a rotator starting at index 0 with the default marker.
    pub fn new(banners: BannerSet<E>) -> Self {
        Self {
            banners,
            current: 0,
            ticks: 0,
            marker: DEFAULT_MARKER.to_string(),
            observer: None,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Publish a [`Rotation`] after every transition.
    ///
    /// Once the receiving side is dropped the rotator stops publishing but keeps rotating.
    pub fn with_observer(mut self, observer: UnboundedSender<Rotation>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn banners(&self) -> &BannerSet<E> {
        &self.banners
    }

    /// Perform one transition. Returns `None` (and does nothing) for an empty set.
    pub fn tick(&mut self) -> Option<Rotation> {
        let len = self.banners.len();
        if len == 0 {
            return None;
        }

        let previous = self.current;
        if let Some(banner) = self.banners.get(previous) {
            banner.remove_class(&self.marker);
        }
        self.current = (previous + 1) % len;
        if let Some(banner) = self.banners.get(self.current) {
            banner.add_class(&self.marker);
        }
        self.ticks += 1;

        let rotation = Rotation {
            tick: self.ticks,
            previous,
            current: self.current,
        };
        log::trace!(
            "rotation #{}: banner {} -> {}",
            rotation.tick,
            previous,
            self.current
        );

        let closed = self
            .observer
            .as_ref()
            .is_some_and(|observer| observer.send(rotation).is_err());
        if closed {
            log::debug!("rotation observer closed, no longer publishing");
            self.observer = None;
        }

        Some(rotation)
    }

    /// Hand the rotator to `scheduler`, transitioning once per `period`.
    ///
    /// An empty set never starts: no timer is registered and `Ok(None)` is returned.
    pub fn start<S>(mut self, scheduler: &S, period: Duration) -> Result<Option<IntervalHandle>>
    where
        S: Scheduler + ?Sized,
    {
        if self.banners.is_empty() {
            log::debug!("no banners to rotate, rotation not started");
            return Ok(None);
        }

        let count = self.banners.len();
        let marker = self.marker.clone();
        let handle = scheduler.set_interval(
            period,
            Box::new(move || {
                self.tick();
            }),
        )?;
        log::debug!(
            "rotating {} banner(s) every {:?} using marker '{}'",
            count,
            period,
            marker
        );
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementRef, ManualScheduler};
    use proptest::prelude::*;
    use tokio::sync::mpsc;

    fn banners(n: usize) -> BannerSet<ElementRef> {
        let elements = (0..n)
            .map(|idx| {
                let el = ElementRef::new("img");
                if idx == 0 {
                    el.add_class(DEFAULT_MARKER);
                }
                el
            })
            .collect();
        BannerSet::new(elements)
    }

    #[test]
    fn tick_moves_the_marker_and_wraps() {
        let set = banners(3);
        let mut rotator = Rotator::new(set.clone());

        let first = rotator.tick().unwrap();
        assert_eq!(
            first,
            Rotation {
                tick: 1,
                previous: 0,
                current: 1
            }
        );
        assert_eq!(set.marked_indices(DEFAULT_MARKER), vec![1]);

        rotator.tick();
        rotator.tick();
        assert_eq!(rotator.current_index(), 0);
        assert_eq!(rotator.ticks(), 3);
        assert_eq!(set.marked_indices(DEFAULT_MARKER), vec![0]);
    }

    #[test]
    fn single_banner_stays_marked() {
        let set = banners(1);
        let mut rotator = Rotator::new(set.clone());
        for _ in 0..5 {
            let rotation = rotator.tick().unwrap();
            assert_eq!((rotation.previous, rotation.current), (0, 0));
        }
        assert_eq!(set.marked_indices(DEFAULT_MARKER), vec![0]);
    }

    #[test]
    fn empty_set_tick_is_a_no_op() {
        let mut rotator = Rotator::new(banners(0));
        assert!(rotator.tick().is_none());
        assert_eq!(rotator.ticks(), 0);
        assert_eq!(rotator.current_index(), 0);
    }

    #[test]
    fn custom_marker_leaves_other_classes_alone() {
        let set = BannerSet::new(vec![
            ElementRef::new("img").with_class("shown").with_class("active"),
            ElementRef::new("img"),
        ]);
        let mut rotator = Rotator::new(set.clone()).with_marker("shown");
        assert_eq!(rotator.marker(), "shown");

        rotator.tick();
        assert_eq!(set.marked_indices("shown"), vec![1]);
        assert_eq!(set.marked_indices("active"), vec![0]);
    }

    #[test]
    fn observer_receives_each_rotation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut rotator = Rotator::new(banners(2)).with_observer(tx);

        rotator.tick();
        rotator.tick();

        assert_eq!(rx.try_recv().unwrap().current, 1);
        assert_eq!(rx.try_recv().unwrap().current, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_observer_does_not_stop_rotation() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut rotator = Rotator::new(banners(2)).with_observer(tx);

        assert!(rotator.tick().is_some());
        assert!(rotator.tick().is_some());
        assert_eq!(rotator.current_index(), 0);
    }

    #[test]
    fn start_with_empty_set_registers_nothing() {
        let scheduler = ManualScheduler::new();
        let handle = Rotator::new(banners(0))
            .start(&scheduler, DEFAULT_PERIOD)
            .unwrap();

        assert!(handle.is_none());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn start_with_zero_period_fails() {
        let scheduler = ManualScheduler::new();
        assert!(Rotator::new(banners(2))
            .start(&scheduler, Duration::ZERO)
            .is_err());
    }

    proptest! {
        #[test]
        fn index_after_k_ticks_is_k_mod_n(n in 1usize..16, k in 0usize..64) {
            let set = banners(n);
            let mut rotator = Rotator::new(set.clone());
            for _ in 0..k {
                rotator.tick();
            }

            prop_assert_eq!(rotator.current_index(), k % n);
            prop_assert_eq!(set.marked_indices(DEFAULT_MARKER), vec![k % n]);
        }
    }
}
