//! The FSM driver.

use crate::core::{StateHistory, StateId, StateRef, Transition};
use crate::driver::config::{DriverConfig, UnknownTargetPolicy};
use crate::driver::fault::{DriverError, Fault, FaultHandler, LifecycleHook};
use crate::driver::stats::{Counters, DriverStats};
use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Where the driver is in its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Built, initial state not yet enabled
    Constructed,
    /// `boot` has run
    Booted,
    /// `terminate` has run; boot and transitions are rejected
    Terminated,
}

/// Result of [`Fsm::perform_transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome<I> {
    /// `to` is now current and has been enabled
    Completed { from: I, to: I },

    /// `target` is not registered. `from` was disabled and is still
    /// current; whether it was re-enabled depends on
    /// [`UnknownTargetPolicy`].
    UnknownTarget { from: I, target: I },
}

impl<I> TransitionOutcome<I> {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransitionOutcome::Completed { .. })
    }
}

/// Finite state machine driver.
///
/// Holds exactly one current state, evaluates guarded transitions out of
/// it, and brackets each occupancy with `enable`/`disable`. Hooks, guards
/// and `transitions()` always run without the state lock held, so they may
/// call back into [`Fsm::current_state`]. The flip side is that a hook can
/// run for a state that another thread has already moved away from; set
/// [`DriverConfig::serialize_transitions`] to rule that out between
/// concurrent drivers.
///
/// # Example
///
/// ```rust
/// use keelhaul::core::{State, StateError, StateRef, Transition};
/// use keelhaul::Fsm;
/// use std::sync::Arc;
///
/// struct Step(&'static str, &'static str);
///
/// impl State for Step {
///     type Id = &'static str;
///     fn id(&self) -> &'static str { self.0 }
///     fn enable(&self) -> Result<(), StateError> { Ok(()) }
///     fn disable(&self) -> Result<(), StateError> { Ok(()) }
///     fn transitions(&self) -> Vec<Transition<&'static str>> {
///         vec![Transition::to(self.1).when(|| true)]
///     }
/// }
///
/// let a: StateRef<&'static str> = Arc::new(Step("a", "b"));
/// let b: StateRef<&'static str> = Arc::new(Step("b", "a"));
/// let fsm = Fsm::new(Arc::clone(&a), vec![a, b]);
///
/// fsm.boot().unwrap();
/// assert_eq!(fsm.current_id(), "b");
///
/// let next = fsm.ready_transition().unwrap();
/// fsm.perform_transition(&next).unwrap();
/// assert_eq!(fsm.current_id(), "a");
///
/// fsm.terminate().unwrap();
/// ```
pub struct Fsm<I: StateId> {
    instance: Uuid,
    config: DriverConfig,
    current: RwLock<StateRef<I>>,
    registry: HashMap<I, StateRef<I>>,
    phase: Mutex<Phase>,
    sequence: ReentrantMutex<()>,
    history: Mutex<StateHistory<I>>,
    counters: Counters,
    fault_handler: Option<FaultHandler<I>>,
}

impl<I: StateId> Fsm<I> {
    /// Create a driver with the default config.
    ///
    /// `states` is every state the machine may reach. If two states share an
    /// identifier the last one wins. `initial` is registered too if its
    /// identifier is not already present; otherwise the registered state
    /// with that identifier becomes current. No hook is called until
    /// [`Fsm::boot`].
    pub fn new(initial: StateRef<I>, states: impl IntoIterator<Item = StateRef<I>>) -> Self {
        Self::with_config(initial, states, DriverConfig::default())
    }

    pub fn with_config(
        initial: StateRef<I>,
        states: impl IntoIterator<Item = StateRef<I>>,
        config: DriverConfig,
    ) -> Self {
        let mut registry = HashMap::new();
        for state in states {
            let id = state.id();
            if registry.insert(id.clone(), state).is_some() {
                warn!(fsm = %config.name, state = ?id, "duplicate state identifier, last registration wins");
            }
        }
        let registered = Arc::clone(
            registry
                .entry(initial.id())
                .or_insert_with(|| Arc::clone(&initial)),
        );
        if !Arc::ptr_eq(&registered, &initial) {
            warn!(
                fsm = %config.name,
                state = ?initial.id(),
                "initial state shadowed by a registered state with the same identifier"
            );
        }

        Self::from_parts(registered, registry, config, None)
    }

    pub(crate) fn from_parts(
        initial: StateRef<I>,
        registry: HashMap<I, StateRef<I>>,
        config: DriverConfig,
        fault_handler: Option<FaultHandler<I>>,
    ) -> Self {
        let instance = Uuid::new_v4();
        debug!(
            fsm = %config.name,
            %instance,
            initial = ?initial.id(),
            states = registry.len(),
            "constructed"
        );

        Self {
            instance,
            history: Mutex::new(StateHistory::with_limit(config.history_limit)),
            config,
            current: RwLock::new(initial),
            registry,
            phase: Mutex::new(Phase::Constructed),
            sequence: ReentrantMutex::new(()),
            counters: Counters::default(),
            fault_handler,
        }
    }

    /// The current state. Never blocks for longer than a swap.
    pub fn current_state(&self) -> StateRef<I> {
        Arc::clone(&self.current.read())
    }

    pub fn current_id(&self) -> I {
        self.current_state().id()
    }

    /// Enable the initial state, then perform at most one ready transition.
    ///
    /// Returns the outcome of that transition, or `None` if nothing was
    /// ready. Boot does not keep evaluating after the first transition;
    /// chain [`Fsm::ready_transition`] and [`Fsm::perform_transition`] for
    /// that.
    pub fn boot(&self) -> Result<Option<TransitionOutcome<I>>, DriverError> {
        let _sequence = self.sequence();
        {
            let mut phase = self.phase.lock();
            match *phase {
                Phase::Constructed => *phase = Phase::Booted,
                Phase::Booted => return Err(DriverError::AlreadyBooted),
                Phase::Terminated => return Err(DriverError::Terminated { operation: "boot" }),
            }
        }

        let initial = self.current_state();
        info!(fsm = %self.config.name, instance = %self.instance, state = ?initial.id(), "booting");
        self.run_hook(&initial, LifecycleHook::Enable);

        match self.ready_transition() {
            Some(transition) => self.perform_transition(&transition).map(Some),
            None => Ok(None),
        }
    }

    /// First transition out of the current state, in declared order, whose
    /// guards all pass.
    pub fn ready_transition(&self) -> Option<Transition<I>> {
        let current = self.current_state();
        self.counters.evaluated();

        let ready = current.transitions().into_iter().find(|t| self.pass_guards(t));
        debug!(
            fsm = %self.config.name,
            instance = %self.instance,
            state = ?current.id(),
            ready = ?ready.as_ref().map(|t| &t.target),
            "evaluated transitions"
        );
        ready
    }

    /// True iff every guard of `transition` passes, stopping at the first
    /// that fails.
    pub fn pass_guards(&self, transition: &Transition<I>) -> bool {
        transition.pass_guards()
    }

    /// Disable the current state, make `transition.target` current, enable it.
    ///
    /// The target is looked up only after the outgoing state is disabled. If
    /// it is not registered an [`Fault::UnknownTarget`] is reported and the
    /// current state does not change. Allowed before [`Fsm::boot`]; rejected
    /// after [`Fsm::terminate`].
    pub fn perform_transition(
        &self,
        transition: &Transition<I>,
    ) -> Result<TransitionOutcome<I>, DriverError> {
        let _sequence = self.sequence();
        if *self.phase.lock() == Phase::Terminated {
            return Err(DriverError::Terminated {
                operation: "perform_transition",
            });
        }

        let outgoing = self.current_state();
        let from = outgoing.id();
        let target = transition.target.clone();
        self.run_hook(&outgoing, LifecycleHook::Disable);

        let Some(incoming) = self.registry.get(&target).cloned() else {
            self.report(Fault::UnknownTarget {
                from: from.clone(),
                target: target.clone(),
            });
            if self.config.on_unknown_target == UnknownTargetPolicy::ReenableOutgoing {
                self.run_hook(&outgoing, LifecycleHook::Enable);
            }
            return Ok(TransitionOutcome::UnknownTarget { from, target });
        };

        *self.current.write() = Arc::clone(&incoming);
        self.counters.transitioned();
        self.history.lock().record(from.clone(), target.clone());
        debug!(fsm = %self.config.name, instance = %self.instance, from = ?from, to = ?target, "transitioned");

        self.run_hook(&incoming, LifecycleHook::Enable);
        Ok(TransitionOutcome::Completed { from, to: target })
    }

    /// Disable the current state. Only the first call does anything; later
    /// calls return [`DriverError::Terminated`] without touching the state.
    pub fn terminate(&self) -> Result<(), DriverError> {
        let _sequence = self.sequence();
        {
            let mut phase = self.phase.lock();
            if *phase == Phase::Terminated {
                return Err(DriverError::Terminated {
                    operation: "terminate",
                });
            }
            *phase = Phase::Terminated;
        }

        let current = self.current_state();
        info!(fsm = %self.config.name, instance = %self.instance, state = ?current.id(), "terminating");
        self.run_hook(&current, LifecycleHook::Disable);
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    pub fn stats(&self) -> DriverStats {
        self.counters.snapshot()
    }

    /// Copy of the transition history.
    pub fn history(&self) -> StateHistory<I> {
        self.history.lock().clone()
    }

    pub fn contains(&self, id: &I) -> bool {
        self.registry.contains_key(id)
    }

    /// Registered identifiers, in no particular order.
    pub fn registered_ids(&self) -> Vec<I> {
        self.registry.keys().cloned().collect()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn sequence(&self) -> Option<ReentrantMutexGuard<'_, ()>> {
        self.config
            .serialize_transitions
            .then(|| self.sequence.lock())
    }

    fn run_hook(&self, state: &StateRef<I>, hook: LifecycleHook) {
        let result = match hook {
            LifecycleHook::Enable => {
                self.counters.enabled();
                state.enable()
            }
            LifecycleHook::Disable => {
                self.counters.disabled();
                state.disable()
            }
        };

        if let Err(source) = result {
            self.report(Fault::Lifecycle {
                state: state.id(),
                hook,
                source,
            });
        }
    }

    fn report(&self, fault: Fault<I>) {
        self.counters.faulted();
        match &fault {
            Fault::Lifecycle { .. } => {
                warn!(fsm = %self.config.name, instance = %self.instance, %fault, "lifecycle fault")
            }
            Fault::UnknownTarget { .. } => {
                error!(fsm = %self.config.name, instance = %self.instance, %fault, "transition refused")
            }
        }
        if let Some(handler) = &self.fault_handler {
            handler(&fault);
        }
    }
}

impl<I: StateId> fmt::Debug for Fsm<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.config.name)
            .field("instance", &self.instance)
            .field("current", &self.current_id())
            .field("phase", &self.phase())
            .field("states", &self.registry.len())
            .finish()
    }
}
