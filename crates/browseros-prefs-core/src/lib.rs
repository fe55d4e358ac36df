//! BrowserOS Prefs Core Library
//!
//! Registers the BrowserOS server preferences (CDP, MCP and Agent ports plus
//! the MCP enablement flag) into a local-state preference registry, and
//! provides the Local State store the defaults are read through.

pub mod error;
pub mod local_state;
pub mod registry;
pub mod server_prefs;
pub mod settings;
pub mod value;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::error::PrefError;

    // Values and registration
    pub use crate::registry::{PrefRegistry, PrefRegistrySimple, RegisteredPref};
    pub use crate::value::{PrefKind, PrefValue};

    // Server preferences
    pub use crate::server_prefs::{
        PrefsRevision, register_local_state_prefs, register_local_state_prefs_for,
    };
    pub use crate::settings::{PortSetting, ServerSettings};

    // Local State
    pub use crate::local_state::{LocalState, PrefEntry, default_local_state_path};
}
