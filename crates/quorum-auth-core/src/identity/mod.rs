pub mod kerberos_name;

pub use kerberos_name::*;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity {0:?} has no realm ('@' separator missing)")]
    MissingRealm(String),

    #[error("identity {0:?} has no host instance ('/' separator missing)")]
    MissingInstance(String),

    #[error("identity {0:?} has an empty component")]
    EmptyComponent(String),

    #[error("identity {0:?} has a stray separator in one of its components")]
    StraySeparator(String),
}
