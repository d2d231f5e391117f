//! Build errors for the driver builder.

use thiserror::Error;

/// Errors that can occur when building a driver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(id) before .build()")]
    MissingInitialState,

    #[error("No states registered. Add at least one state")]
    NoStates,

    #[error("Initial state {id} is not registered")]
    UnknownInitialState { id: String },

    #[error("State {id} registered more than once")]
    DuplicateState { id: String },
}
