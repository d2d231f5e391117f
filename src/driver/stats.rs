//! Operation counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a driver's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStats {
    /// `enable` calls made, failed or not
    pub enables: u64,
    /// `disable` calls made, failed or not
    pub disables: u64,
    /// Evaluation passes, i.e. calls to `transitions()` on the current state
    pub evaluations: u64,
    /// Transitions that swapped the current state
    pub transitions: u64,
    /// Lifecycle and unknown-target faults reported
    pub faults: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    enables: AtomicU64,
    disables: AtomicU64,
    evaluations: AtomicU64,
    transitions: AtomicU64,
    faults: AtomicU64,
}

impl Counters {
    pub(crate) fn enabled(&self) {
        self.enables.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn disabled(&self) {
        self.disables.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn evaluated(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn transitioned(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn faulted(&self) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> DriverStats {
        DriverStats {
            enables: self.enables.load(Ordering::Relaxed),
            disables: self.disables.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
            transitions: self.transitions.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }
}
