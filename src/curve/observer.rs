//! Optional instrumentation of group operations.
//!
//! The group law reports additions and doublings to an installed
//! [`GroupObserver`]. Nothing is reported until an observer is installed,
//! and correctness never depends on one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Receives notifications from the group law. All methods default to no-ops.
pub trait GroupObserver: Send + Sync {
    fn on_add(&self, _curve: &'static str) {}

    fn on_mixed_add(&self, _curve: &'static str) {}

    fn on_double(&self, _curve: &'static str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a group observer is already installed")]
pub struct ObserverAlreadyInstalled;

static OBSERVER: OnceLock<&'static dyn GroupObserver> = OnceLock::new();

/// Installs the process-wide observer. Can succeed at most once.
pub fn install_observer(observer: &'static dyn GroupObserver) -> Result<(), ObserverAlreadyInstalled> {
    OBSERVER.set(observer).map_err(|_| ObserverAlreadyInstalled)
}

#[inline]
pub(crate) fn notify<F: FnOnce(&dyn GroupObserver)>(f: F) {
    if let Some(observer) = OBSERVER.get() {
        f(*observer);
    }
}

/// Snapshot of an [`OpCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub add: u64,
    pub mixed_add: u64,
    pub double: u64,
}

/// Counts group operations across all curves with atomic counters.
#[derive(Debug, Default)]
pub struct OpCounter {
    add: AtomicU64,
    mixed_add: AtomicU64,
    double: AtomicU64,
}

impl OpCounter {
    pub const fn new() -> Self {
        Self {
            add: AtomicU64::new(0),
            mixed_add: AtomicU64::new(0),
            double: AtomicU64::new(0),
        }
    }

    pub fn counts(&self) -> OpCounts {
        OpCounts {
            add: self.add.load(Ordering::Relaxed),
            mixed_add: self.mixed_add.load(Ordering::Relaxed),
            double: self.double.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.add.store(0, Ordering::Relaxed);
        self.mixed_add.store(0, Ordering::Relaxed);
        self.double.store(0, Ordering::Relaxed);
    }
}

impl GroupObserver for OpCounter {
    fn on_add(&self, _curve: &'static str) {
        self.add.fetch_add(1, Ordering::Relaxed);
    }

    fn on_mixed_add(&self, _curve: &'static str) {
        self.mixed_add.fetch_add(1, Ordering::Relaxed);
    }

    fn on_double(&self, _curve: &'static str) {
        self.double.fetch_add(1, Ordering::Relaxed);
    }
}

/// Emits a `trace` event per group operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GroupObserver for TracingObserver {
    fn on_add(&self, curve: &'static str) {
        tracing::trace!(curve, op = "add", "group operation");
    }

    fn on_mixed_add(&self, curve: &'static str) {
        tracing::trace!(curve, op = "mixed_add", "group operation");
    }

    fn on_double(&self, curve: &'static str) {
        tracing::trace!(curve, op = "double", "group operation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_counts_and_resets() {
        let counter = OpCounter::new();
        counter.on_add("test");
        counter.on_add("test");
        counter.on_double("test");
        counter.on_mixed_add("test");
        assert_eq!(
            counter.counts(),
            OpCounts {
                add: 2,
                mixed_add: 1,
                double: 1
            }
        );
        counter.reset();
        assert_eq!(counter.counts(), OpCounts::default());
    }
}
