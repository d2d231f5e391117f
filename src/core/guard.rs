//! Guard predicates for controlling transitions.
//!
//! A guard takes no arguments. Whatever it inspects, it captures.

use std::fmt;
use std::sync::Arc;

/// Zero-argument predicate that must hold for its transition to be eligible.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use keelhaul::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let door_closed = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&door_closed);
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// door_closed.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be thread-safe (Send + Sync); it may be called
    /// from whichever thread drives the machine.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// Guard that never passes.
    pub fn never() -> Self {
        Guard::new(|| false)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}
