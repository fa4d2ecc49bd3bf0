pub(crate) mod acceptor;
pub(crate) mod initiator;
pub(crate) mod mac;
pub(crate) mod token;

pub use acceptor::DigestAcceptor;
pub use initiator::DigestInitiator;

pub(crate) const ALGORITHM: &str = "hmac-sha256";
