//! Builder for constructing drivers.

use crate::builder::error::BuildError;
use crate::core::{State, StateId, StateRef};
use crate::driver::{DriverConfig, Fault, FaultHandler, Fsm};
use std::collections::HashMap;
use std::sync::Arc;

/// Builder for constructing an [`Fsm`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use keelhaul::builder::FsmBuilder;
/// use keelhaul::core::{State, StateError, Transition};
/// use keelhaul::DriverConfig;
///
/// struct Parked;
///
/// impl State for Parked {
///     type Id = &'static str;
///     fn id(&self) -> &'static str { "parked" }
///     fn enable(&self) -> Result<(), StateError> { Ok(()) }
///     fn disable(&self) -> Result<(), StateError> { Ok(()) }
///     fn transitions(&self) -> Vec<Transition<&'static str>> { Vec::new() }
/// }
///
/// let fsm = FsmBuilder::new()
///     .state(Parked)
///     .initial("parked")
///     .config(DriverConfig::default().named("car"))
///     .on_fault(|fault| eprintln!("{fault}"))
///     .build()
///     .unwrap();
///
/// assert_eq!(fsm.current_id(), "parked");
/// ```
pub struct FsmBuilder<I: StateId> {
    initial: Option<I>,
    states: Vec<StateRef<I>>,
    config: DriverConfig,
    fault_handler: Option<FaultHandler<I>>,
}

impl<I: StateId> FsmBuilder<I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            config: DriverConfig::default(),
            fault_handler: None,
        }
    }

    /// Identifier of the initial state (required). Must be registered.
    pub fn initial(mut self, id: I) -> Self {
        self.initial = Some(id);
        self
    }

    /// Register a state.
    pub fn state<S>(mut self, state: S) -> Self
    where
        S: State<Id = I> + 'static,
    {
        self.states.push(Arc::new(state));
        self
    }

    /// Register a state the caller keeps a handle to.
    pub fn shared(mut self, state: StateRef<I>) -> Self {
        self.states.push(state);
        self
    }

    /// Register multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = StateRef<I>>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Called for every fault the driver reports.
    pub fn on_fault<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Fault<I>) + Send + Sync + 'static,
    {
        self.fault_handler = Some(Arc::new(handler));
        self
    }

    /// Build the driver.
    /// Returns an error if required fields are missing or the registry is
    /// inconsistent.
    pub fn build(self) -> Result<Fsm<I>, BuildError> {
        let initial_id = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut registry = HashMap::with_capacity(self.states.len());
        for state in self.states {
            let id = state.id();
            if registry.contains_key(&id) {
                return Err(BuildError::DuplicateState {
                    id: format!("{id:?}"),
                });
            }
            registry.insert(id, state);
        }

        let initial = registry
            .get(&initial_id)
            .cloned()
            .ok_or_else(|| BuildError::UnknownInitialState {
                id: format!("{initial_id:?}"),
            })?;

        Ok(Fsm::from_parts(
            initial,
            registry,
            self.config,
            self.fault_handler,
        ))
    }
}

impl<I: StateId> Default for FsmBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
