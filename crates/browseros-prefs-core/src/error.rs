//! Typed errors for preference registration and lookup.

use thiserror::Error;

use crate::value::PrefKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefError {
    #[error("Preference '{0}' is not registered")]
    UnregisteredPref(String),

    #[error("Preference '{key}' is registered as {registered}, not {requested}")]
    TypeMismatch {
        key: String,
        registered: PrefKind,
        requested: PrefKind,
    },

    #[error("Preference '{key}' is already registered with default {existing}, refusing {requested}")]
    ConflictingRegistration {
        key: String,
        existing: String,
        requested: String,
    },

    #[error("Invalid value '{value}' for {kind} preference")]
    InvalidValue { kind: PrefKind, value: String },

    #[error("Invalid port {port} for '{key}'. Must be between 0 and 65535")]
    InvalidPort { key: String, port: i32 },

    #[error("Port {port} is used by both '{first}' and '{second}'")]
    PortConflict {
        port: u16,
        first: String,
        second: String,
    },
}
