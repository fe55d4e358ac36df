//! Preference registry for declaring keys and their defaults.
//!
//! Components register their preferences once at startup; the Local State
//! store then resolves reads against these registrations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PrefError;
use crate::value::{PrefKind, PrefValue};

/// Registration facility that preference owners register their keys with.
pub trait PrefRegistry {
    /// Register an integer preference with its default.
    fn register_integer_pref(&mut self, key: &str, default: i32);

    /// Register a boolean preference with its default.
    fn register_boolean_pref(&mut self, key: &str, default: bool);
}

/// A registered preference: its key and default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredPref {
    pub key: String,
    pub default: PrefValue,
}

impl RegisteredPref {
    pub fn kind(&self) -> PrefKind {
        self.default.kind()
    }
}

/// Registry of preference defaults, ordered by key.
///
/// Registering a key again with the same default is a no-op. Registering it
/// with a different default or kind is rejected and the first registration
/// is kept.
#[derive(Debug, Clone, Default)]
pub struct PrefRegistrySimple {
    prefs: BTreeMap<String, RegisteredPref>,
}

impl PrefRegistrySimple {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key`, failing if it is already registered differently.
    pub fn try_register(&mut self, key: &str, default: PrefValue) -> Result<(), PrefError> {
        if let Some(existing) = self.prefs.get(key) {
            if existing.default == default {
                return Ok(());
            }
            return Err(PrefError::ConflictingRegistration {
                key: key.to_string(),
                existing: format!("{} {}", existing.kind(), existing.default),
                requested: format!("{} {}", default.kind(), default),
            });
        }

        tracing::debug!(key, %default, "Registered preference");
        self.prefs.insert(
            key.to_string(),
            RegisteredPref {
                key: key.to_string(),
                default,
            },
        );
        Ok(())
    }

    fn register_or_warn(&mut self, key: &str, default: PrefValue) {
        if let Err(err) = self.try_register(key, default) {
            tracing::warn!("{err}");
        }
    }

    /// Get a registration by key.
    pub fn get(&self, key: &str) -> Option<&RegisteredPref> {
        self.prefs.get(key)
    }

    /// Get the registered default for `key`.
    pub fn default_value(&self, key: &str) -> Option<PrefValue> {
        self.prefs.get(key).map(|pref| pref.default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.prefs.contains_key(key)
    }

    /// Iterate over all registrations in key order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredPref> {
        self.prefs.values()
    }

    pub fn len(&self) -> usize {
        self.prefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefs.is_empty()
    }
}

impl PrefRegistry for PrefRegistrySimple {
    fn register_integer_pref(&mut self, key: &str, default: i32) {
        self.register_or_warn(key, PrefValue::Integer(default));
    }

    fn register_boolean_pref(&mut self, key: &str, default: bool) {
        self.register_or_warn(key, PrefValue::Boolean(default));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PrefRegistrySimple::new();
        registry.register_integer_pref("a.port", 8080);
        registry.register_boolean_pref("a.enabled", false);

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.default_value("a.port"),
            Some(PrefValue::Integer(8080))
        );
        assert_eq!(registry.get("a.enabled").unwrap().kind(), PrefKind::Boolean);
        assert!(!registry.contains("a.missing"));
    }

    #[test]
    fn test_identical_reregistration_is_noop() {
        let mut registry = PrefRegistrySimple::new();
        registry.try_register("a.port", PrefValue::Integer(1)).unwrap();
        registry.try_register("a.port", PrefValue::Integer(1)).unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_registration_keeps_first() {
        let mut registry = PrefRegistrySimple::new();
        registry.try_register("a.port", PrefValue::Integer(1)).unwrap();

        let err = registry
            .try_register("a.port", PrefValue::Integer(2))
            .unwrap_err();
        assert!(matches!(err, PrefError::ConflictingRegistration { .. }));

        registry.register_boolean_pref("a.port", true);
        assert_eq!(registry.default_value("a.port"), Some(PrefValue::Integer(1)));
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let mut registry = PrefRegistrySimple::new();
        registry.register_integer_pref("b", 2);
        registry.register_integer_pref("a", 1);
        registry.register_integer_pref("c", 3);

        let keys: Vec<&str> = registry.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
