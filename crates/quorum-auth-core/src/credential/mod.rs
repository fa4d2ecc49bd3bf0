pub mod types;
pub mod login;

pub use types::*;
pub use login::*;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("shared-secret login must carry exactly one username, found {0}")]
    Username(usize),

    #[error("shared-secret login must carry exactly one password, found {0}")]
    Password(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("no login context named {0:?}")]
    UnknownContext(String),

    #[error("login {context:?} failed: {reason}")]
    Failed { context: String, reason: String },
}
