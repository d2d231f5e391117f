//! Faults and errors raised while driving a machine.

use crate::core::{StateError, StateId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which lifecycle hook failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleHook {
    Enable,
    Disable,
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleHook::Enable => f.write_str("enable"),
            LifecycleHook::Disable => f.write_str("disable"),
        }
    }
}

/// Best-effort faults. They are logged, counted and handed to the fault
/// handler, but never stop the driver.
#[derive(Debug, Error)]
pub enum Fault<I: StateId> {
    /// A state's `enable` or `disable` hook returned an error
    #[error("state {state:?} failed to {hook}: {source}")]
    Lifecycle {
        state: I,
        hook: LifecycleHook,
        #[source]
        source: StateError,
    },

    /// A transition named a state that is not registered. The outgoing
    /// state has already been disabled when this is raised.
    #[error("transition from {from:?} targets unregistered state {target:?}")]
    UnknownTarget { from: I, target: I },
}

/// Callback invoked for every fault, on the thread that hit it.
pub type FaultHandler<I> = Arc<dyn Fn(&Fault<I>) + Send + Sync>;

/// Misuse of the driver's own lifecycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("machine already booted")]
    AlreadyBooted,

    #[error("machine terminated, {operation} rejected")]
    Terminated { operation: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_fault_names_state_and_hook() {
        let fault = Fault::Lifecycle {
            state: "foo",
            hook: LifecycleHook::Disable,
            source: StateError::failed("valve stuck"),
        };

        assert_eq!(
            fault.to_string(),
            "state \"foo\" failed to disable: valve stuck"
        );
        assert!(std::error::Error::source(&fault).is_some());
    }

    #[test]
    fn unknown_target_fault_message() {
        let fault: Fault<&str> = Fault::UnknownTarget {
            from: "foo",
            target: "bar",
        };

        assert_eq!(
            fault.to_string(),
            "transition from \"foo\" targets unregistered state \"bar\""
        );
    }

    #[test]
    fn driver_error_messages() {
        assert_eq!(DriverError::AlreadyBooted.to_string(), "machine already booted");
        assert_eq!(
            DriverError::Terminated { operation: "boot" }.to_string(),
            "machine terminated, boot rejected"
        );
    }
}
