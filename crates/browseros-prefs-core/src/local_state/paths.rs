//! Local State path resolution helpers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the Local State location.
pub const LOCAL_STATE_ENV: &str = "BROWSEROS_LOCAL_STATE";

pub const LOCAL_STATE_FILE: &str = "Local State";

/// Local State file inside a BrowserOS user data directory.
pub fn local_state_path_in(user_data_dir: &Path) -> PathBuf {
    user_data_dir.join(LOCAL_STATE_FILE)
}

/// Resolve the Local State path from an optional override and config dir.
pub fn resolve_local_state_path(
    env_override: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let config_dir =
        config_dir.ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(local_state_path_in(&config_dir.join("BrowserOS")))
}

/// Default Local State path for the current user.
pub fn default_local_state_path() -> anyhow::Result<PathBuf> {
    resolve_local_state_path(std::env::var_os(LOCAL_STATE_ENV), dirs::config_dir())
}
