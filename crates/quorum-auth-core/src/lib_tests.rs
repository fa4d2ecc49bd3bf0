use std::collections::HashMap;

use crate::config::{
    QuorumAuthConfig, ENV_ENABLED, ENV_NATIVE_TICKETS, ENV_SERVER_REALM, ENV_SERVICE_PRINCIPAL,
};
use crate::framing::FrameLimits;

#[test]
fn config_defaults_match_deployed_names() {
    let cfg = QuorumAuthConfig::default();
    assert!(!cfg.enabled);
    assert_eq!(cfg.service_principal, "zkquorum/localhost");
    assert_eq!(cfg.client_login_context, "QuorumClient");
    assert_eq!(cfg.server_login_context, "QuorumServer");
    assert_eq!(cfg.server_realm, None);
    assert!(!cfg.native_tickets);
    assert_eq!(cfg.frame_limits, FrameLimits::DEFAULT);
}

#[test]
fn config_reads_overrides_from_lookup() {
    let vars: HashMap<&str, &str> = HashMap::from([
        (ENV_ENABLED, "TRUE"),
        (ENV_SERVICE_PRINCIPAL, "zookeeper/peer1.example.com"),
        (ENV_SERVER_REALM, "EXAMPLE.COM"),
        (ENV_NATIVE_TICKETS, "yes"),
    ]);

    let cfg = QuorumAuthConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
    assert!(cfg.enabled);
    assert_eq!(cfg.service_principal, "zookeeper/peer1.example.com");
    assert_eq!(cfg.server_realm.as_deref(), Some("EXAMPLE.COM"));
    // Anything other than "true" leaves a flag off.
    assert!(!cfg.native_tickets);
    assert_eq!(cfg.client_login_context, "QuorumClient");
}

#[test]
fn empty_realm_override_is_ignored() {
    let cfg = QuorumAuthConfig::from_lookup(|k| (k == ENV_SERVER_REALM).then(String::new));
    assert_eq!(cfg.server_realm, None);
}

#[test]
fn frame_limits_cover_large_tokens() {
    assert!(FrameLimits::DEFAULT.max_payload_len >= 64 * 1024);
}

#[test]
fn configured_frame_limits_never_drop_below_minimum() {
    let tiny = QuorumAuthConfig::default().with_frame_limits(FrameLimits { max_payload_len: 8 });
    assert_eq!(tiny.frame_limits.max_payload_len, FrameLimits::MIN_PAYLOAD_LEN);

    let large = FrameLimits { max_payload_len: 4 << 20 };
    assert_eq!(QuorumAuthConfig::default().with_frame_limits(large).frame_limits, large);
}
