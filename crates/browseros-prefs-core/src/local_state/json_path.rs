//! Dotted-key access into a Local State JSON document.
//!
//! `browseros.server.cdp_port` lives at `{"browseros":{"server":{"cdp_port":..}}}`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

pub(crate) fn split_key(key: &str) -> Vec<&str> {
    key.split('.').collect()
}

pub(crate) fn get_at_path<'a>(root: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }
    current.get(*last)
}

pub(crate) fn set_at_path(
    root: &mut Map<String, Value>,
    path: &[&str],
    value: Value,
) -> anyhow::Result<()> {
    let Some((last, parents)) = path.split_last() else {
        anyhow::bail!("Preference path cannot be empty");
    };
    let mut current = root;
    for segment in parents {
        let next = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match next {
            Value::Object(map) => current = map,
            _ => anyhow::bail!("Expected '{}' to be a JSON object", segment),
        }
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Remove the value at `path`, pruning parent objects left empty.
///
/// Returns the removed value, if any.
pub(crate) fn remove_at_path(root: &mut Map<String, Value>, path: &[&str]) -> Option<Value> {
    match path {
        [] => None,
        [last] => root.remove(*last),
        [first, rest @ ..] => {
            let child = root.get_mut(*first)?.as_object_mut()?;
            let removed = remove_at_path(child, rest);
            if removed.is_some() && child.is_empty() {
                root.remove(*first);
            }
            removed
        }
    }
}

pub(crate) fn load_json_map(path: &Path) -> anyhow::Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read local state: {}", path.display()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse local state JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Expected JSON object at root: {}", path.display()),
    }
}

pub(crate) fn write_json_map(path: &Path, map: &Map<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create local state directory: {}", parent.display())
        })?;
    }
    let bytes = serde_json::to_vec_pretty(map).context("Failed to serialize local state")?;

    // Replace through a sibling temp file; the target is never truncated in place.
    let tmp_path = tmp_path_for(path);
    std::fs::write(&tmp_path, bytes)
        .with_context(|| format!("Failed to write tmp local state: {}", tmp_path.display()))?;
    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err)
            .with_context(|| format!("Failed to replace local state: {}", path.display()));
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("local-state"));
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
