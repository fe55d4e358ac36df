//! Local State preference store.
//!
//! Resolves reads of registered preferences against user values persisted in
//! a Local State JSON file, falling back to the registered defaults. Content
//! of the file that does not belong to a registered preference is kept as-is
//! and written back on save.

mod json_path;
pub mod paths;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PrefError;
use crate::registry::{PrefRegistrySimple, RegisteredPref};
use crate::value::{PrefKind, PrefValue};

use json_path::{get_at_path, load_json_map, remove_at_path, set_at_path, split_key, write_json_map};

pub use paths::{LOCAL_STATE_ENV, default_local_state_path, local_state_path_in};

/// Effective state of one registered preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefEntry {
    pub key: String,
    pub kind: PrefKind,
    pub default: PrefValue,
    pub value: PrefValue,
    pub user_set: bool,
}

#[derive(Debug, Clone)]
pub struct LocalState {
    registry: PrefRegistrySimple,
    root: Map<String, Value>,
    path: Option<PathBuf>,
    /// Registered keys whose stored value has the wrong type.
    mistyped: Vec<String>,
}

impl LocalState {
    /// In-memory Local State with no user values.
    pub fn new(registry: PrefRegistrySimple) -> Self {
        Self {
            registry,
            root: Map::new(),
            path: None,
            mistyped: Vec::new(),
        }
    }

    /// Load user values from `path`. A missing file yields no user values.
    pub fn load(registry: PrefRegistrySimple, path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let root = load_json_map(&path)?;
        tracing::debug!(path = %path.display(), "Loaded local state");
        let mistyped = find_mistyped(&registry, &root);
        Ok(Self {
            registry,
            root,
            path: Some(path),
            mistyped,
        })
    }

    pub fn registry(&self) -> &PrefRegistrySimple {
        &self.registry
    }

    /// Keys whose stored value was ignored at load for having the wrong type.
    pub fn mistyped_keys(&self) -> &[String] {
        &self.mistyped
    }

    fn registration(&self, key: &str) -> Result<&RegisteredPref, PrefError> {
        self.registry
            .get(key)
            .ok_or_else(|| PrefError::UnregisteredPref(key.to_string()))
    }

    /// Stored user value for a registration, if present and well-typed.
    fn user_value(&self, pref: &RegisteredPref) -> Option<PrefValue> {
        let stored = get_at_path(&self.root, &split_key(&pref.key))?;
        PrefValue::from_json(pref.kind(), stored)
    }

    /// Effective value of `key`: the user value if set, else the default.
    pub fn get(&self, key: &str) -> Result<PrefValue, PrefError> {
        let pref = self.registration(key)?;
        Ok(self.user_value(pref).unwrap_or(pref.default))
    }

    pub fn get_integer(&self, key: &str) -> Result<i32, PrefError> {
        let value = self.get(key)?;
        value.as_integer().ok_or_else(|| PrefError::TypeMismatch {
            key: key.to_string(),
            registered: value.kind(),
            requested: PrefKind::Integer,
        })
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool, PrefError> {
        let value = self.get(key)?;
        value.as_boolean().ok_or_else(|| PrefError::TypeMismatch {
            key: key.to_string(),
            registered: value.kind(),
            requested: PrefKind::Boolean,
        })
    }

    /// Store a user value for `key`. The value must match the registered kind.
    pub fn set(&mut self, key: &str, value: PrefValue) -> anyhow::Result<()> {
        let pref = self.registration(key)?;
        if pref.kind() != value.kind() {
            return Err(PrefError::TypeMismatch {
                key: key.to_string(),
                registered: pref.kind(),
                requested: value.kind(),
            }
            .into());
        }
        set_at_path(&mut self.root, &split_key(key), value.to_json())?;
        self.mistyped.retain(|k| k != key);
        tracing::debug!(key, %value, "Set preference");
        Ok(())
    }

    pub fn set_integer(&mut self, key: &str, value: i32) -> anyhow::Result<()> {
        self.set(key, PrefValue::Integer(value))
    }

    pub fn set_boolean(&mut self, key: &str, value: bool) -> anyhow::Result<()> {
        self.set(key, PrefValue::Boolean(value))
    }

    /// Drop the user value for `key` so it reads as its default again.
    ///
    /// Returns whether a stored value was removed. A stored value of the wrong
    /// type is removed too, even though `has_user_value` reports it as unset.
    pub fn clear(&mut self, key: &str) -> Result<bool, PrefError> {
        self.registration(key)?;
        let removed = remove_at_path(&mut self.root, &split_key(key)).is_some();
        self.mistyped.retain(|k| k != key);
        if removed {
            tracing::debug!(key, "Cleared preference");
        }
        Ok(removed)
    }

    /// Whether `key` has a well-typed stored value.
    pub fn has_user_value(&self, key: &str) -> Result<bool, PrefError> {
        let pref = self.registration(key)?;
        Ok(self.user_value(pref).is_some())
    }

    pub fn is_default(&self, key: &str) -> Result<bool, PrefError> {
        self.has_user_value(key).map(|user_set| !user_set)
    }

    /// Effective state of every registered preference, in key order.
    pub fn entries(&self) -> Vec<PrefEntry> {
        self.registry
            .iter()
            .map(|pref| {
                let user = self.user_value(pref);
                PrefEntry {
                    key: pref.key.clone(),
                    kind: pref.kind(),
                    default: pref.default,
                    value: user.unwrap_or(pref.default),
                    user_set: user.is_some(),
                }
            })
            .collect()
    }

    /// Save to the path this Local State was loaded from.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Local state has no backing file"))?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        write_json_map(path, &self.root)?;
        tracing::debug!(path = %path.display(), "Saved local state");
        Ok(())
    }
}

/// Collect registered keys with a stored value of the wrong type, warning once per key.
fn find_mistyped(registry: &PrefRegistrySimple, root: &Map<String, Value>) -> Vec<String> {
    let mut mistyped = Vec::new();
    for pref in registry.iter() {
        let Some(stored) = get_at_path(root, &split_key(&pref.key)) else {
            continue;
        };
        if PrefValue::from_json(pref.kind(), stored).is_none() {
            tracing::warn!(
                key = %pref.key,
                stored = %stored,
                "Ignoring stored value that is not a valid {}",
                pref.kind()
            );
            mistyped.push(pref.key.clone());
        }
    }
    mistyped
}
