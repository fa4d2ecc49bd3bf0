use tracing::{debug, warn};

use crate::{
    context::{ContextGuard, SecurityContext},
    error::{AuthCause, AuthenticationFailure},
    framing::FrameIo,
    protocol::HandshakeStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiatorState {
    Start,
    InitialResponseSent,
    Continuing { round: u32 },
    Done,
    Failed,
}

/// Client half of the handshake.
///
/// Sends the context's initial token (or an empty frame), then feeds every
/// status-tagged reply back into the context. A SUCCESS reply is evaluated
/// but never answered: the acceptor has already finished.
#[derive(Debug)]
pub struct Initiator {
    state: InitiatorState,
}

impl Initiator {
    pub fn new() -> Self {
        Self {
            state: InitiatorState::Start,
        }
    }

    pub fn state(&self) -> InitiatorState {
        self.state
    }

    /// Drive `context` to completion over `io`. The context is disposed
    /// before this returns, on every path.
    pub async fn run<F>(
        &mut self,
        io: &mut F,
        context: Box<dyn SecurityContext>,
    ) -> Result<(), AuthenticationFailure>
    where
        F: FrameIo + ?Sized,
    {
        let mut context = ContextGuard::new(context);
        let result = self.drive(io, &mut context).await;
        drop(context);

        self.state = match &result {
            Ok(()) => InitiatorState::Done,
            Err(e) => {
                warn!(error = %e, "initiator handshake failed");
                InitiatorState::Failed
            }
        };
        result
    }

    async fn drive<F>(
        &mut self,
        io: &mut F,
        context: &mut ContextGuard,
    ) -> Result<(), AuthenticationFailure>
    where
        F: FrameIo + ?Sized,
    {
        let initial = if context.has_initial_output() {
            context.evaluate(&[]).await?.unwrap_or_default()
        } else {
            Vec::new()
        };
        io.write_response(&initial).await?;
        self.state = InitiatorState::InitialResponseSent;
        debug!(mechanism = context.mechanism(), len = initial.len(), "sent initial response");

        let mut msg = io.read_message().await?;
        let mut round = 0;

        while !context.is_complete()
            && matches!(msg.status(), HandshakeStatus::Continue | HandshakeStatus::Success)
        {
            round += 1;
            self.state = InitiatorState::Continuing { round };
            debug!(round, status = ?msg.status(), len = msg.payload().len(), "received challenge");

            let response = context.evaluate(msg.payload()).await?;
            if msg.status() == HandshakeStatus::Success {
                break;
            }

            let response = response.unwrap_or_default();
            io.write_response(&response).await?;
            debug!(round, len = response.len(), "sent response");
            msg = io.read_message().await?;
        }

        if msg.status() == HandshakeStatus::Error {
            return Err(AuthCause::PeerRejected.into());
        }
        if !context.is_complete() {
            return Err(AuthCause::Incomplete.into());
        }

        debug!(mechanism = context.mechanism(), rounds = round, "initiator handshake complete");
        Ok(())
    }
}

impl Default for Initiator {
    fn default() -> Self {
        Self::new()
    }
}
