//! Local State preferences for the BrowserOS servers.
//!
//! The CDP, MCP and Agent servers read their listen ports and enablement
//! from these keys. Defaults are registered once at startup, before any
//! server reads them.

use std::fmt;
use std::str::FromStr;

use crate::registry::PrefRegistry;
use crate::value::PrefValue;

/// CDP server port (0 = auto-assign random port on startup)
pub const CDP_SERVER_PORT: &str = "browseros.server.cdp_port";

/// MCP server port (HTTP)
pub const MCP_SERVER_PORT: &str = "browseros.server.mcp_port";

/// Agent server port
pub const AGENT_SERVER_PORT: &str = "browseros.server.agent_port";

/// Whether the MCP server is enabled
pub const MCP_SERVER_ENABLED: &str = "browseros.server.mcp_enabled";

pub const DEFAULT_CDP_PORT: i32 = 9223;
pub const DEFAULT_MCP_PORT: i32 = 9233;
pub const DEFAULT_AGENT_PORT: i32 = 9243;

/// MCP port used before the Agent server was introduced.
pub const LEGACY_MCP_PORT: i32 = 9224;

/// Which set of server preferences to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrefsRevision {
    /// CDP and MCP only, MCP on 9224.
    V1,
    /// Adds the Agent server; MCP moves to 9233.
    #[default]
    V2,
}

impl PrefsRevision {
    /// The preference table for this revision, in registration order.
    pub fn defaults(self) -> Vec<(&'static str, PrefValue)> {
        match self {
            PrefsRevision::V1 => vec![
                (CDP_SERVER_PORT, PrefValue::Integer(DEFAULT_CDP_PORT)),
                (MCP_SERVER_PORT, PrefValue::Integer(LEGACY_MCP_PORT)),
                (MCP_SERVER_ENABLED, PrefValue::Boolean(true)),
            ],
            PrefsRevision::V2 => vec![
                (CDP_SERVER_PORT, PrefValue::Integer(DEFAULT_CDP_PORT)),
                (MCP_SERVER_PORT, PrefValue::Integer(DEFAULT_MCP_PORT)),
                (AGENT_SERVER_PORT, PrefValue::Integer(DEFAULT_AGENT_PORT)),
                (MCP_SERVER_ENABLED, PrefValue::Boolean(true)),
            ],
        }
    }
}

impl fmt::Display for PrefsRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsRevision::V1 => write!(f, "v1"),
            PrefsRevision::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for PrefsRevision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Ok(PrefsRevision::V1),
            "v2" | "2" => Ok(PrefsRevision::V2),
            _ => anyhow::bail!("Unknown prefs revision: {}. Use 'v1' or 'v2'", s),
        }
    }
}

/// Register the server preferences with their current defaults.
pub fn register_local_state_prefs(registry: &mut impl PrefRegistry) {
    register_local_state_prefs_for(registry, PrefsRevision::default());
}

/// Register the server preferences of a specific revision.
pub fn register_local_state_prefs_for(registry: &mut impl PrefRegistry, revision: PrefsRevision) {
    tracing::debug!(%revision, "Registering BrowserOS server prefs");
    for (key, default) in revision.defaults() {
        match default {
            PrefValue::Integer(value) => registry.register_integer_pref(key, value),
            PrefValue::Boolean(value) => registry.register_boolean_pref(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PrefRegistrySimple;

    /// Records every call so registration order and types can be checked.
    #[derive(Default)]
    struct RecordingRegistry {
        calls: Vec<(String, PrefValue)>,
    }

    impl PrefRegistry for RecordingRegistry {
        fn register_integer_pref(&mut self, key: &str, default: i32) {
            self.calls.push((key.to_string(), PrefValue::Integer(default)));
        }

        fn register_boolean_pref(&mut self, key: &str, default: bool) {
            self.calls.push((key.to_string(), PrefValue::Boolean(default)));
        }
    }

    #[test]
    fn test_v1_registers_three_prefs() {
        let mut registry = RecordingRegistry::default();
        register_local_state_prefs_for(&mut registry, PrefsRevision::V1);

        assert_eq!(
            registry.calls,
            vec![
                (CDP_SERVER_PORT.to_string(), PrefValue::Integer(9223)),
                (MCP_SERVER_PORT.to_string(), PrefValue::Integer(9224)),
                (MCP_SERVER_ENABLED.to_string(), PrefValue::Boolean(true)),
            ]
        );
    }

    #[test]
    fn test_default_revision_is_v2() {
        let mut registry = RecordingRegistry::default();
        register_local_state_prefs(&mut registry);

        assert_eq!(registry.calls.len(), 4);
        assert!(
            registry
                .calls
                .contains(&(AGENT_SERVER_PORT.to_string(), PrefValue::Integer(9243)))
        );
        assert!(
            registry
                .calls
                .contains(&(MCP_SERVER_PORT.to_string(), PrefValue::Integer(9233)))
        );
    }

    #[test]
    fn test_registering_twice_is_idempotent() {
        let mut registry = PrefRegistrySimple::new();
        register_local_state_prefs(&mut registry);
        register_local_state_prefs(&mut registry);

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.default_value(CDP_SERVER_PORT),
            Some(PrefValue::Integer(DEFAULT_CDP_PORT))
        );
    }

    #[test]
    fn test_revision_from_str() {
        assert_eq!("v1".parse::<PrefsRevision>().unwrap(), PrefsRevision::V1);
        assert_eq!("V2".parse::<PrefsRevision>().unwrap(), PrefsRevision::V2);
        assert!("v3".parse::<PrefsRevision>().is_err());
    }
}
