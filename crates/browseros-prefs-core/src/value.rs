//! Preference value model.
//!
//! Local State preferences handled here are either 32-bit integers or
//! booleans, matching what the server prefs register.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::PrefError;

/// Kind of value a preference holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefKind {
    Integer,
    Boolean,
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefKind::Integer => write!(f, "integer"),
            PrefKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// A typed preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    Integer(i32),
    Boolean(bool),
}

impl PrefValue {
    pub fn kind(&self) -> PrefKind {
        match self {
            PrefValue::Integer(_) => PrefKind::Integer,
            PrefValue::Boolean(_) => PrefKind::Boolean,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            PrefValue::Integer(value) => Some(*value),
            PrefValue::Boolean(_) => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PrefValue::Boolean(value) => Some(*value),
            PrefValue::Integer(_) => None,
        }
    }

    /// Convert a stored JSON value into a preference of the given kind.
    ///
    /// Returns `None` when the JSON type does not match or an integer does
    /// not fit in 32 bits.
    pub fn from_json(kind: PrefKind, value: &Value) -> Option<Self> {
        match kind {
            PrefKind::Integer => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(PrefValue::Integer),
            PrefKind::Boolean => value.as_bool().map(PrefValue::Boolean),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            PrefValue::Integer(value) => Value::from(*value),
            PrefValue::Boolean(value) => Value::Bool(*value),
        }
    }

    /// Parse user-provided text (e.g. from the command line) as `kind`.
    pub fn parse(kind: PrefKind, text: &str) -> Result<Self, PrefError> {
        let trimmed = text.trim();
        let invalid = || PrefError::InvalidValue {
            kind,
            value: text.to_string(),
        };
        match kind {
            PrefKind::Integer => trimmed
                .parse::<i32>()
                .map(PrefValue::Integer)
                .map_err(|_| invalid()),
            PrefKind::Boolean => match trimmed.to_lowercase().as_str() {
                "true" => Ok(PrefValue::Boolean(true)),
                "false" => Ok(PrefValue::Boolean(false)),
                _ => Err(invalid()),
            },
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Integer(value) => write!(f, "{value}"),
            PrefValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}
