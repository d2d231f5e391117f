//! The FSM driver and its ambient pieces.
//!
//! - `Fsm`: current-state slot, registry and transition evaluation
//! - Faults and driver errors
//! - Configuration, loadable from JSON
//! - Operation counters

mod config;
mod fault;
mod machine;
mod stats;

pub use config::{ConfigError, DriverConfig, UnknownTargetPolicy};
pub use fault::{DriverError, Fault, FaultHandler, LifecycleHook};
pub use machine::{Fsm, Phase, TransitionOutcome};
pub use stats::DriverStats;
