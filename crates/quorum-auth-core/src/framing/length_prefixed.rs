use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::framing::{FrameIo, FrameLimits, FramingError};
use crate::protocol::{HandshakeMessage, HandshakeStatus};

/// Length-prefixed handshake framing over an async byte stream.
///
/// Frame formats (all integers are big-endian i32):
///   response: [length][payload...]
///   message:  [status ordinal][length][payload...]
pub struct LengthPrefixedFrameIo<RW> {
    io: RW,
    limits: FrameLimits,
}

impl<RW> LengthPrefixedFrameIo<RW> {
    pub fn new(io: RW, limits: FrameLimits) -> Self {
        Self { io, limits }
    }

    pub fn limits(&self) -> FrameLimits {
        self.limits
    }

    pub fn into_inner(self) -> RW {
        self.io
    }
}

/// Encode an initiator frame: length then payload.
pub fn encode_response(payload: &[u8], limits: FrameLimits) -> Result<Vec<u8>, FramingError> {
    let len = limits.wire_len(payload.len())?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Encode an acceptor frame: status ordinal, length, then payload.
pub fn encode_message(msg: &HandshakeMessage, limits: FrameLimits) -> Result<Vec<u8>, FramingError> {
    let payload = msg.payload();
    let len = limits.wire_len(payload.len())?;
    let mut out = Vec::with_capacity(8 + payload.len());
    out.extend_from_slice(&msg.status().ordinal().to_be_bytes());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Map std::io errors into the framing error taxonomy.
fn map_io_err(e: std::io::Error) -> FramingError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        FramingError::UnexpectedEof
    } else {
        FramingError::Io(e)
    }
}

impl<RW> LengthPrefixedFrameIo<RW>
where
    RW: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_payload(&mut self) -> Result<Vec<u8>, FramingError> {
        let len = self.io.read_i32().await.map_err(map_io_err)?;
        let len = self.limits.validate_wire_len(len)?;

        let mut payload = vec![0u8; len];
        self.io.read_exact(&mut payload).await.map_err(map_io_err)?;
        Ok(payload)
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), FramingError> {
        self.io.write_all(frame).await.map_err(map_io_err)?;
        self.io.flush().await.map_err(map_io_err)?;
        Ok(())
    }
}

#[async_trait]
impl<RW> FrameIo for LengthPrefixedFrameIo<RW>
where
    RW: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_response(&mut self) -> Result<Vec<u8>, FramingError> {
        self.read_payload().await
    }

    async fn write_response(&mut self, payload: &[u8]) -> Result<(), FramingError> {
        let frame = encode_response(payload, self.limits)?;
        self.write_frame(&frame).await
    }

    async fn read_message(&mut self) -> Result<HandshakeMessage, FramingError> {
        let ordinal = self.io.read_i32().await.map_err(map_io_err)?;
        let status = HandshakeStatus::from_ordinal(ordinal)?;
        let payload = self.read_payload().await?;
        Ok(HandshakeMessage::new(status, payload))
    }

    async fn write_message(&mut self, msg: &HandshakeMessage) -> Result<(), FramingError> {
        let frame = encode_message(msg, self.limits)?;
        self.write_frame(&frame).await
    }
}
