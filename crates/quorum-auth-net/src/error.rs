use thiserror::Error;

use quorum_auth_core::AuthenticationFailure;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] AuthenticationFailure),
}
