pub mod types;
pub mod native;
pub mod selector;

pub use types::*;
pub use native::*;
pub use selector::*;


use crate::{credential::CredentialError, identity::IdentityError};

pub const SHARED_SECRET_MECHANISM: &str = "DIGEST-MD5";
pub const TICKET_MECHANISM: &str = "GSSAPI";

// Both fixed strings are shared byte-for-byte with every acceptor.
pub const SHARED_SECRET_PROTOCOL: &str = "zookeeper-quorum";
pub const SHARED_SECRET_REALM: &str = "zk-quorum-sasl-md5";

pub const KRB5_MECHANISM_OID: &str = "1.2.840.113554.1.2.2";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
}
