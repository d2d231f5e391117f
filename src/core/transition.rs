//! Candidate transitions produced by states.

use super::guard::Guard;
use super::state::StateId;

/// A candidate move to `target`, gated by an ordered list of guards.
///
/// # Example
///
/// ```rust
/// use keelhaul::core::{Guard, Transition};
///
/// let transition = Transition::to("open")
///     .guard(Guard::always())
///     .when(|| 2 + 2 == 4);
///
/// assert_eq!(transition.target, "open");
/// assert!(transition.pass_guards());
/// ```
#[derive(Clone, Debug)]
pub struct Transition<I: StateId> {
    /// Identifier of the state to move to
    pub target: I,
    /// Guards evaluated in order; all must pass
    pub guards: Vec<Guard>,
}

impl<I: StateId> Transition<I> {
    /// Transition to `target` with the given guards.
    pub fn new(target: I, guards: Vec<Guard>) -> Self {
        Self { target, guards }
    }

    /// Unguarded transition to `target`.
    pub fn to(target: I) -> Self {
        Self::new(target, Vec::new())
    }

    /// Append a guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Append a guard built from a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// True iff every guard passes. Stops at the first guard that fails;
    /// an empty guard list passes.
    pub fn pass_guards(&self) -> bool {
        self.guards.iter().all(Guard::check)
    }
}
