pub mod traits;
pub mod guard;

pub use traits::*;
pub use guard::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("mechanism {0} is not supported by this security backend")]
    UnsupportedMechanism(&'static str),

    #[error("security context creation failed: {0}")]
    Creation(String),

    #[error("security context evaluation failed: {0}")]
    Evaluation(String),

    #[error("peer failed authentication: {0}")]
    Rejected(String),

    #[error("security context is already complete")]
    AlreadyComplete,

    #[error("security context has been disposed")]
    Disposed,

    #[error("native credential unavailable: {0}")]
    NativeCredential(String),
}
