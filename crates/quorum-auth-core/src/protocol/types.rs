use crate::protocol::ProtocolError;

// Ordinals are fixed by declaration order and shared with every deployed peer.
// New statuses may only ever be appended.
pub const STATUS_CONTINUE: i32 = 0;
pub const STATUS_SUCCESS: i32 = 1;
pub const STATUS_ERROR: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeStatus {
    Continue,
    Success,
    Error,
}

impl HandshakeStatus {
    pub const fn ordinal(self) -> i32 {
        match self {
            HandshakeStatus::Continue => STATUS_CONTINUE,
            HandshakeStatus::Success => STATUS_SUCCESS,
            HandshakeStatus::Error => STATUS_ERROR,
        }
    }

    pub fn from_ordinal(ordinal: i32) -> Result<Self, ProtocolError> {
        match ordinal {
            STATUS_CONTINUE => Ok(HandshakeStatus::Continue),
            STATUS_SUCCESS => Ok(HandshakeStatus::Success),
            STATUS_ERROR => Ok(HandshakeStatus::Error),
            other => Err(ProtocolError::InvalidStatus(other)),
        }
    }
}

impl TryFrom<i32> for HandshakeStatus {
    type Error = ProtocolError;

    fn try_from(ordinal: i32) -> Result<Self, ProtocolError> {
        HandshakeStatus::from_ordinal(ordinal)
    }
}

/// A status-tagged handshake message, as sent by the accepting side.
///
/// The payload may be empty but is always present; a context that produced
/// no token is carried as a zero-length payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeMessage {
    status: HandshakeStatus,
    payload: Vec<u8>,
}

impl HandshakeMessage {
    pub fn new(status: HandshakeStatus, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            payload: payload.into(),
        }
    }

    pub fn status(&self) -> HandshakeStatus {
        self.status
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
