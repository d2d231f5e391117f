//! Keelhaul: a minimal guarded finite state machine driver
//!
//! The driver holds exactly one current state at a time. Callers supply the
//! states; the driver keeps the registry, evaluates guards to pick the next
//! transition, and calls `enable`/`disable` as states come and go. It never
//! loops on its own: the embedding application decides when to evaluate.
//!
//! # Core Concepts
//!
//! - **State**: Caller-defined type implementing the `State` trait
//! - **Guards**: Zero-argument predicates gating a transition
//! - **Transition**: Target identifier plus ordered guards; the first ready
//!   transition in declared order wins
//! - **Faults**: Lifecycle and unknown-target failures are logged and
//!   reported, never propagated as hard errors
//!
//! # Example
//!
//! ```rust
//! use keelhaul::core::{State, StateError, Transition};
//! use keelhaul::{FsmBuilder, TransitionOutcome};
//!
//! struct Light {
//!     id: &'static str,
//!     next: &'static str,
//! }
//!
//! impl State for Light {
//!     type Id = &'static str;
//!
//!     fn id(&self) -> &'static str {
//!         self.id
//!     }
//!
//!     fn enable(&self) -> Result<(), StateError> {
//!         Ok(())
//!     }
//!
//!     fn disable(&self) -> Result<(), StateError> {
//!         Ok(())
//!     }
//!
//!     fn transitions(&self) -> Vec<Transition<&'static str>> {
//!         vec![Transition::to(self.next).when(|| true)]
//!     }
//! }
//!
//! let fsm = FsmBuilder::new()
//!     .state(Light { id: "red", next: "green" })
//!     .state(Light { id: "green", next: "yellow" })
//!     .state(Light { id: "yellow", next: "red" })
//!     .initial("red")
//!     .build()
//!     .unwrap();
//!
//! let booted = fsm.boot().unwrap();
//! assert_eq!(booted, Some(TransitionOutcome::Completed { from: "red", to: "green" }));
//!
//! while fsm.current_id() != "red" {
//!     let next = fsm.ready_transition().unwrap();
//!     fsm.perform_transition(&next).unwrap();
//! }
//!
//! fsm.terminate().unwrap();
//! assert_eq!(fsm.stats().transitions, 3);
//! ```

pub mod builder;
pub mod core;
pub mod driver;

// Re-export commonly used types
pub use crate::builder::{BuildError, FsmBuilder};
pub use crate::core::{Guard, State, StateError, StateHistory, StateId, StateRef, Transition};
pub use crate::driver::{
    DriverConfig, DriverError, DriverStats, Fault, Fsm, LifecycleHook, Phase, TransitionOutcome,
    UnknownTargetPolicy,
};
