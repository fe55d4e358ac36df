//! Resolved server settings read from Local State.

use std::fmt;

use serde::Serialize;

use crate::error::PrefError;
use crate::local_state::LocalState;
use crate::server_prefs::{AGENT_SERVER_PORT, CDP_SERVER_PORT, MCP_SERVER_ENABLED, MCP_SERVER_PORT};

/// A listen port preference. A stored `0` means pick a random port at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSetting {
    Auto,
    Fixed(u16),
}

impl PortSetting {
    pub fn from_pref(key: &str, value: i32) -> Result<Self, PrefError> {
        match value {
            0 => Ok(PortSetting::Auto),
            _ => u16::try_from(value)
                .map(PortSetting::Fixed)
                .map_err(|_| PrefError::InvalidPort {
                    key: key.to_string(),
                    port: value,
                }),
        }
    }

    pub fn fixed(&self) -> Option<u16> {
        match self {
            PortSetting::Auto => None,
            PortSetting::Fixed(port) => Some(*port),
        }
    }
}

impl fmt::Display for PortSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSetting::Auto => write!(f, "auto"),
            PortSetting::Fixed(port) => write!(f, "{port}"),
        }
    }
}

/// Ports and enablement the BrowserOS servers start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub cdp_port: PortSetting,
    pub mcp_port: PortSetting,
    /// `None` when the Agent port is not registered.
    pub agent_port: Option<PortSetting>,
    pub mcp_enabled: bool,
}

impl ServerSettings {
    pub fn from_local_state(state: &LocalState) -> Result<Self, PrefError> {
        let port = |key: &str| -> Result<PortSetting, PrefError> {
            PortSetting::from_pref(key, state.get_integer(key)?)
        };

        let agent_port = if state.registry().contains(AGENT_SERVER_PORT) {
            Some(port(AGENT_SERVER_PORT)?)
        } else {
            None
        };

        Ok(Self {
            cdp_port: port(CDP_SERVER_PORT)?,
            mcp_port: port(MCP_SERVER_PORT)?,
            agent_port,
            mcp_enabled: state.get_boolean(MCP_SERVER_ENABLED)?,
        })
    }

    /// Reject two servers configured with the same fixed port.
    ///
    /// The MCP port only counts when the MCP server is enabled.
    pub fn validate(&self) -> Result<(), PrefError> {
        let mut claimed: Vec<(&str, u16)> = Vec::new();
        let mut candidates = vec![(CDP_SERVER_PORT, self.cdp_port)];
        if self.mcp_enabled {
            candidates.push((MCP_SERVER_PORT, self.mcp_port));
        }
        if let Some(agent_port) = self.agent_port {
            candidates.push((AGENT_SERVER_PORT, agent_port));
        }

        for (key, setting) in candidates {
            let Some(port) = setting.fixed() else {
                continue;
            };
            if let Some((first, _)) = claimed.iter().find(|(_, p)| *p == port) {
                return Err(PrefError::PortConflict {
                    port,
                    first: first.to_string(),
                    second: key.to_string(),
                });
            }
            claimed.push((key, port));
        }
        Ok(())
    }
}
