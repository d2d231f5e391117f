//! Builder API for constructing drivers.
//!
//! [`FsmBuilder`] is the checked alternative to [`Fsm::new`](crate::Fsm::new):
//! it refuses duplicate identifiers and an initial identifier that was never
//! registered instead of silently accepting them.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::FsmBuilder;
