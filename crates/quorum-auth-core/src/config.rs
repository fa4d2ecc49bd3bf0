use crate::framing::FrameLimits;

pub const ENV_ENABLED: &str = "QUORUM_AUTH_ENABLED";
pub const ENV_SERVICE_PRINCIPAL: &str = "QUORUM_AUTH_SERVICE_PRINCIPAL";
pub const ENV_CLIENT_LOGIN_CONTEXT: &str = "QUORUM_AUTH_CLIENT_LOGIN_CONTEXT";
pub const ENV_SERVER_LOGIN_CONTEXT: &str = "QUORUM_AUTH_SERVER_LOGIN_CONTEXT";
pub const ENV_SERVER_REALM: &str = "QUORUM_AUTH_SERVER_REALM";
pub const ENV_NATIVE_TICKETS: &str = "QUORUM_AUTH_NATIVE_TICKETS";

pub const DEFAULT_SERVICE_PRINCIPAL: &str = "zkquorum/localhost";
pub const DEFAULT_CLIENT_LOGIN_CONTEXT: &str = "QuorumClient";
pub const DEFAULT_SERVER_LOGIN_CONTEXT: &str = "QuorumServer";

/// Settings consumed by the quorum authentication layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuorumAuthConfig {
    pub enabled: bool,
    /// Expected acceptor service, `service/host` without realm.
    pub service_principal: String,
    pub client_login_context: String,
    pub server_login_context: String,
    /// Overrides the realm taken from the initiator's own principal.
    pub server_realm: Option<String>,
    /// Ask the platform for a native ticket-granting credential.
    pub native_tickets: bool,
    pub frame_limits: FrameLimits,
}

impl Default for QuorumAuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_principal: DEFAULT_SERVICE_PRINCIPAL.to_owned(),
            client_login_context: DEFAULT_CLIENT_LOGIN_CONTEXT.to_owned(),
            server_login_context: DEFAULT_SERVER_LOGIN_CONTEXT.to_owned(),
            server_realm: None,
            native_tickets: false,
            frame_limits: FrameLimits::DEFAULT,
        }
    }
}

impl QuorumAuthConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup(ENV_ENABLED) {
            cfg.enabled = parse_flag(&v);
        }
        if let Some(v) = lookup(ENV_SERVICE_PRINCIPAL) {
            cfg.service_principal = v;
        }
        if let Some(v) = lookup(ENV_CLIENT_LOGIN_CONTEXT) {
            cfg.client_login_context = v;
        }
        if let Some(v) = lookup(ENV_SERVER_LOGIN_CONTEXT) {
            cfg.server_login_context = v;
        }
        cfg.server_realm = lookup(ENV_SERVER_REALM).filter(|v| !v.is_empty());
        if let Some(v) = lookup(ENV_NATIVE_TICKETS) {
            cfg.native_tickets = parse_flag(&v);
        }

        cfg
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_service_principal(mut self, principal: impl Into<String>) -> Self {
        self.service_principal = principal.into();
        self
    }

    pub fn with_client_login_context(mut self, name: impl Into<String>) -> Self {
        self.client_login_context = name.into();
        self
    }

    pub fn with_server_login_context(mut self, name: impl Into<String>) -> Self {
        self.server_login_context = name.into();
        self
    }

    pub fn with_server_realm(mut self, realm: impl Into<String>) -> Self {
        self.server_realm = Some(realm.into());
        self
    }

    pub fn with_native_tickets(mut self, native: bool) -> Self {
        self.native_tickets = native;
        self
    }

    /// Limits below [`FrameLimits::MIN_PAYLOAD_LEN`] are raised to it.
    pub fn with_frame_limits(mut self, limits: FrameLimits) -> Self {
        self.frame_limits = limits.clamped();
        self
    }
}

// Only "true" (any case) turns a flag on.
fn parse_flag(v: &str) -> bool {
    v.trim().eq_ignore_ascii_case("true")
}
