//! Driver configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with the outgoing state when a transition targets an
/// unregistered state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTargetPolicy {
    /// Leave the outgoing state disabled but current.
    #[default]
    LeaveDisabled,

    /// Call `enable` on the outgoing state again so that the current state
    /// is enabled.
    ReenableOutgoing,
}

/// Errors loading a [`DriverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid driver config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Tunables for an [`Fsm`](crate::Fsm).
///
/// # Example
///
/// ```rust
/// use keelhaul::{DriverConfig, UnknownTargetPolicy};
///
/// let config = DriverConfig::from_json(
///     r#"{ "name": "door", "on_unknown_target": "reenable_outgoing" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.name, "door");
/// assert_eq!(config.on_unknown_target, UnknownTargetPolicy::ReenableOutgoing);
/// assert_eq!(config.history_limit, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Machine name, emitted as the `fsm` field on every log line
    pub name: String,

    /// Handling of the outgoing state when a transition target is unregistered
    pub on_unknown_target: UnknownTargetPolicy,

    /// Serialize boot, transition and terminate sequences across threads.
    /// Re-entrant calls from inside a hook on the same thread still proceed.
    pub serialize_transitions: bool,

    /// Completed transitions kept in memory; 0 disables history
    pub history_limit: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            name: "fsm".to_string(),
            on_unknown_target: UnknownTargetPolicy::default(),
            serialize_transitions: false,
            history_limit: 64,
        }
    }
}

impl DriverConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_unknown_target(mut self, policy: UnknownTargetPolicy) -> Self {
        self.on_unknown_target = policy;
        self
    }

    pub fn serialize_transitions(mut self, enabled: bool) -> Self {
        self.serialize_transitions = enabled;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = DriverConfig::from_json("{}").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.on_unknown_target, UnknownTargetPolicy::LeaveDisabled);
        assert!(!config.serialize_transitions);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DriverConfig::from_json(r#"{ "retries": 3 }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid driver config"));
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = DriverConfig::default()
            .named("pump")
            .on_unknown_target(UnknownTargetPolicy::ReenableOutgoing)
            .serialize_transitions(true)
            .history_limit(0);

        assert_eq!(config.name, "pump");
        assert_eq!(config.on_unknown_target, UnknownTargetPolicy::ReenableOutgoing);
        assert!(config.serialize_transitions);
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = DriverConfig::default().named("door").serialize_transitions(true);
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(DriverConfig::from_json(&json).unwrap(), config);
    }
}
