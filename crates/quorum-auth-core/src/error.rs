use thiserror::Error;

use crate::{
    context::ContextError,
    credential::{CredentialError, LoginError},
    framing::FramingError,
    identity::IdentityError,
    mechanism::SelectionError,
};

/// Why a handshake failed.
#[derive(Debug, Error)]
pub enum AuthCause {
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("login error: {0}")]
    Login(#[from] LoginError),

    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("security context error: {0}")]
    Context(#[from] ContextError),

    #[error("peer reported an authentication error")]
    PeerRejected,

    #[error("handshake ended before the security context completed")]
    Incomplete,
}

impl From<SelectionError> for AuthCause {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::Credential(e) => AuthCause::Credential(e),
            SelectionError::Identity(e) => AuthCause::Identity(e),
        }
    }
}

/// The only error the handshake reports. Inspect [`cause`](Self::cause) to
/// tell failures apart.
#[derive(Debug, Error)]
#[error("quorum peer authentication failed: {cause}")]
pub struct AuthenticationFailure {
    #[source]
    cause: AuthCause,
}

impl AuthenticationFailure {
    pub fn cause(&self) -> &AuthCause {
        &self.cause
    }

    pub fn into_cause(self) -> AuthCause {
        self.cause
    }
}

impl From<AuthCause> for AuthenticationFailure {
    fn from(cause: AuthCause) -> Self {
        Self { cause }
    }
}

macro_rules! failure_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for AuthenticationFailure {
                fn from(e: $source) -> Self {
                    Self { cause: AuthCause::from(e) }
                }
            }
        )*
    };
}

failure_from!(
    FramingError,
    LoginError,
    CredentialError,
    IdentityError,
    ContextError,
    SelectionError,
);
