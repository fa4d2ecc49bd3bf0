pub mod types;

pub use types::*;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid handshake status ordinal: {0}")]
    InvalidStatus(i32),
}
