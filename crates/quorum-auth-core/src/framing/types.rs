use crate::framing::FramingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    pub max_payload_len: u32,
}

impl FrameLimits {
    pub const DEFAULT: FrameLimits = FrameLimits {
        max_payload_len: 1 << 20, // 1 MiB, ample for ticket-bearing tokens
    };

    /// Smallest limit a configured peer may run with; ticket tokens reach tens of KiB.
    pub const MIN_PAYLOAD_LEN: u32 = 64 * 1024;

    /// Raise `max_payload_len` to [`MIN_PAYLOAD_LEN`](Self::MIN_PAYLOAD_LEN) if it is below it.
    pub fn clamped(self) -> Self {
        FrameLimits {
            max_payload_len: self.max_payload_len.max(Self::MIN_PAYLOAD_LEN),
        }
    }

    /// Check a length field read off the wire.
    pub fn validate_wire_len(&self, len: i32) -> Result<usize, FramingError> {
        if len < 0 {
            return Err(FramingError::NegativeLength(len));
        }
        let len = len as u32;
        if len > self.max_payload_len {
            return Err(FramingError::FrameTooLarge {
                len: len as u64,
                max: self.max_payload_len,
            });
        }
        Ok(len as usize)
    }

    /// Compute the length field for an outbound payload.
    pub fn wire_len(&self, payload_len: usize) -> Result<i32, FramingError> {
        let too_large = FramingError::FrameTooLarge {
            len: payload_len as u64,
            max: self.max_payload_len,
        };
        let len = i32::try_from(payload_len).map_err(|_| too_large)?;
        self.validate_wire_len(len)?;
        Ok(len)
    }
}

impl Default for FrameLimits {
    fn default() -> Self {
        FrameLimits::DEFAULT
    }
}
