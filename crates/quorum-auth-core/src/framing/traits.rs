use async_trait::async_trait;

use crate::protocol::{HandshakeMessage, ProtocolError};

/*
    Frame-level interface for the authentication exchange.
      - initiator -> acceptor frames carry only a length-prefixed payload.
      - acceptor -> initiator frames carry a status ordinal first.
    The asymmetry is part of the deployed wire format and must be kept.
*/
#[async_trait]
pub trait FrameIo: Send {
    async fn read_response(&mut self) -> Result<Vec<u8>, FramingError>;
    async fn write_response(&mut self, payload: &[u8]) -> Result<(), FramingError>;

    async fn read_message(&mut self) -> Result<HandshakeMessage, FramingError>;
    async fn write_message(&mut self, msg: &HandshakeMessage) -> Result<(), FramingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    #[error("unexpected EOF while reading a frame")]
    UnexpectedEof,

    #[error("negative frame length: {0}")]
    NegativeLength(i32),

    #[error("frame too large: len={len}, max={max}")]
    FrameTooLarge { len: u64, max: u32 },

    #[error("malformed frame: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}
