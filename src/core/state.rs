//! The State capability that every caller-supplied state implements.
//!
//! States are owned by the caller and shared with the driver through
//! [`StateRef`]. All hooks take `&self`, so a state that needs to track
//! anything across calls uses interior mutability.

use super::transition::Transition;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

/// Identifier of a state within one driver.
///
/// Blanket-implemented for every type with the required bounds, so plain
/// strings, `&'static str` and fieldless enums all work out of the box.
pub trait StateId: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> StateId for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Shared handle to a state, as stored in the driver's registry.
pub type StateRef<I> = Arc<dyn State<Id = I>>;

/// Failure reported by a lifecycle hook.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StateError {
    /// Build a plain message failure.
    pub fn failed(message: impl Into<String>) -> Self {
        StateError::Failed(message.into())
    }
}

/// Trait for states driven by an [`Fsm`](crate::Fsm).
///
/// # Example
///
/// ```rust
/// use keelhaul::core::{State, StateError, Transition};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Idle {
///     enabled: AtomicUsize,
/// }
///
/// impl State for Idle {
///     type Id = &'static str;
///
///     fn id(&self) -> &'static str {
///         "idle"
///     }
///
///     fn enable(&self) -> Result<(), StateError> {
///         self.enabled.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
///
///     fn disable(&self) -> Result<(), StateError> {
///         Ok(())
///     }
///
///     fn transitions(&self) -> Vec<Transition<&'static str>> {
///         vec![Transition::to("busy").when(|| false)]
///     }
/// }
///
/// let idle = Idle { enabled: AtomicUsize::new(0) };
/// assert_eq!(idle.id(), "idle");
/// assert!(idle.enable().is_ok());
/// assert!(!idle.transitions()[0].pass_guards());
/// ```
pub trait State: Send + Sync {
    type Id: StateId;

    /// Identifier, unique among the states registered with one driver and
    /// stable for the lifetime of the state.
    fn id(&self) -> Self::Id;

    /// Called once each time this state becomes current.
    fn enable(&self) -> Result<(), StateError>;

    /// Called once each time this state stops being current.
    fn disable(&self) -> Result<(), StateError>;

    /// Candidate transitions out of this state, in priority order.
    ///
    /// Called on every evaluation pass; the result is not cached.
    fn transitions(&self) -> Vec<Transition<Self::Id>>;
}
