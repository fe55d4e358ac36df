use browseros_prefs_core::error::PrefError;
use browseros_prefs_core::local_state::LocalState;
use browseros_prefs_core::registry::PrefRegistrySimple;
use browseros_prefs_core::server_prefs::{
    AGENT_SERVER_PORT, CDP_SERVER_PORT, MCP_SERVER_ENABLED, MCP_SERVER_PORT, PrefsRevision,
    register_local_state_prefs, register_local_state_prefs_for,
};

fn state_for(revision: PrefsRevision) -> LocalState {
    let mut registry = PrefRegistrySimple::new();
    register_local_state_prefs_for(&mut registry, revision);
    LocalState::new(registry)
}

#[test]
fn cdp_port_defaults_to_9223_in_both_revisions() {
    for revision in [PrefsRevision::V1, PrefsRevision::V2] {
        let state = state_for(revision);
        assert_eq!(state.get_integer(CDP_SERVER_PORT).unwrap(), 9223);
    }
}

#[test]
fn mcp_port_default_depends_on_revision() {
    assert_eq!(
        state_for(PrefsRevision::V1)
            .get_integer(MCP_SERVER_PORT)
            .unwrap(),
        9224
    );
    assert_eq!(
        state_for(PrefsRevision::V2)
            .get_integer(MCP_SERVER_PORT)
            .unwrap(),
        9233
    );
}

#[test]
fn agent_port_only_exists_in_v2() {
    assert_eq!(
        state_for(PrefsRevision::V2)
            .get_integer(AGENT_SERVER_PORT)
            .unwrap(),
        9243
    );

    let err = state_for(PrefsRevision::V1)
        .get_integer(AGENT_SERVER_PORT)
        .unwrap_err();
    assert_eq!(err, PrefError::UnregisteredPref(AGENT_SERVER_PORT.to_string()));
}

#[test]
fn mcp_enabled_defaults_to_true() {
    for revision in [PrefsRevision::V1, PrefsRevision::V2] {
        assert!(state_for(revision).get_boolean(MCP_SERVER_ENABLED).unwrap());
    }
}

#[test]
fn registering_twice_on_fresh_registry_is_idempotent() {
    let mut registry = PrefRegistrySimple::new();
    register_local_state_prefs(&mut registry);
    let first: Vec<_> = registry.iter().cloned().collect();

    register_local_state_prefs(&mut registry);
    let second: Vec<_> = registry.iter().cloned().collect();

    assert_eq!(first, second);
}

#[test]
fn later_revision_does_not_override_earlier_defaults() {
    let mut registry = PrefRegistrySimple::new();
    register_local_state_prefs_for(&mut registry, PrefsRevision::V1);
    register_local_state_prefs_for(&mut registry, PrefsRevision::V2);

    // Conflicting MCP default is rejected, the new Agent key is added.
    assert_eq!(
        registry.default_value(MCP_SERVER_PORT).unwrap().as_integer(),
        Some(9224)
    );
    assert!(registry.contains(AGENT_SERVER_PORT));
}

#[test]
fn typed_getter_mismatch_is_reported() {
    let state = state_for(PrefsRevision::V2);
    assert!(matches!(
        state.get_boolean(CDP_SERVER_PORT),
        Err(PrefError::TypeMismatch { .. })
    ));
}
