use std::ffi::OsString;
use std::path::PathBuf;

use browseros_prefs_core::local_state::paths::resolve_local_state_path;

#[test]
fn env_override_wins() {
    let path = resolve_local_state_path(
        Some(OsString::from("/tmp/custom/Local State")),
        Some(PathBuf::from("/home/user/.config")),
    )
    .unwrap();

    assert_eq!(path, PathBuf::from("/tmp/custom/Local State"));
}

#[test]
fn falls_back_to_config_dir() {
    let path = resolve_local_state_path(None, Some(PathBuf::from("/home/user/.config"))).unwrap();

    assert_eq!(
        path,
        PathBuf::from("/home/user/.config/BrowserOS/Local State")
    );
}

#[test]
fn empty_override_is_ignored() {
    let path = resolve_local_state_path(
        Some(OsString::new()),
        Some(PathBuf::from("/home/user/.config")),
    )
    .unwrap();

    assert!(path.ends_with("BrowserOS/Local State"));
}

#[test]
fn missing_config_dir_is_an_error() {
    assert!(resolve_local_state_path(None, None).is_err());
}
