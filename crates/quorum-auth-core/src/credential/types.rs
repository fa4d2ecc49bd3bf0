use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroizing;

/// Secret credential text. Wiped on drop, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Password::new(s)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Password::new(s)
    }
}

/// Credential material produced by a login.
///
/// Principals select the ticket mechanism. Without principals the
/// initiator expects one public credential (username) and one private
/// credential (password); the acceptor verifies peers against `user_secrets`.
#[derive(Debug, Clone, Default)]
pub struct Credential {
    principals: Vec<String>,
    public_credentials: Vec<String>,
    private_credentials: Vec<Password>,
    user_secrets: BTreeMap<String, Password>,
}

impl Credential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initiator-side shared secret.
    pub fn shared_secret(username: impl Into<String>, password: impl Into<Password>) -> Self {
        Self::new()
            .with_public_credential(username)
            .with_private_credential(password)
    }

    /// Ticket-based login holding `principal`.
    pub fn principal(principal: impl Into<String>) -> Self {
        Self::new().with_principal(principal)
    }

    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principals.push(principal.into());
        self
    }

    pub fn with_public_credential(mut self, value: impl Into<String>) -> Self {
        self.public_credentials.push(value.into());
        self
    }

    pub fn with_private_credential(mut self, value: impl Into<Password>) -> Self {
        self.private_credentials.push(value.into());
        self
    }

    pub fn with_user_secret(mut self, user: impl Into<String>, secret: impl Into<Password>) -> Self {
        self.user_secrets.insert(user.into(), secret.into());
        self
    }

    pub fn principals(&self) -> &[String] {
        &self.principals
    }

    pub fn public_credentials(&self) -> &[String] {
        &self.public_credentials
    }

    pub fn private_credentials(&self) -> &[Password] {
        &self.private_credentials
    }

    pub fn user_secrets(&self) -> &BTreeMap<String, Password> {
        &self.user_secrets
    }
}
