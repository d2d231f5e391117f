//! Core types shared between the driver and caller-defined states:
//! - The `State` capability and its identifier bound
//! - Zero-argument guard predicates
//! - Guarded transitions
//! - Bounded transition history

mod guard;
mod history;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::{State, StateError, StateId, StateRef};
pub use transition::Transition;
