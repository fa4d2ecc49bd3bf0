use tracing::{debug, warn};

use crate::{
    context::{ContextGuard, SecurityContext},
    error::AuthenticationFailure,
    framing::FrameIo,
    protocol::{HandshakeMessage, HandshakeStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptorState {
    Start,
    Continuing { round: u32 },
    Done,
    Failed,
}

/// Server half of the handshake.
///
/// Every round answers with exactly one status-tagged frame: CONTINUE while
/// the context wants more, SUCCESS with the final token once it completes.
#[derive(Debug)]
pub struct Acceptor {
    state: AcceptorState,
    peer: Option<String>,
}

impl Acceptor {
    pub fn new() -> Self {
        Self {
            state: AcceptorState::Start,
            peer: None,
        }
    }

    pub fn state(&self) -> AcceptorState {
        self.state
    }

    /// Peer identity reported by the context on success.
    pub fn peer_identity(&self) -> Option<&str> {
        self.peer.as_deref()
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
        if result.is_ok() {
            self.peer = context.peer_identity().map(str::to_owned);
        }
        drop(context);

        self.state = match &result {
            Ok(()) => AcceptorState::Done,
            Err(e) => {
                warn!(error = %e, "acceptor handshake failed");
                AcceptorState::Failed
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
        let mut response = io.read_response().await?;
        let mut round = 0;

        while !context.is_complete() {
            round += 1;
            self.state = AcceptorState::Continuing { round };
            debug!(round, len = response.len(), "received response");

            let challenge = match context.evaluate(&response).await {
                Ok(challenge) => challenge.unwrap_or_default(),
                Err(e) => {
                    reject(io).await;
                    return Err(e.into());
                }
            };

            if context.is_complete() {
                io.write_message(&HandshakeMessage::new(HandshakeStatus::Success, challenge))
                    .await?;
                break;
            }

            debug!(round, len = challenge.len(), "sent challenge");
            io.write_message(&HandshakeMessage::new(HandshakeStatus::Continue, challenge))
                .await?;
            response = io.read_response().await?;
        }

        debug!(mechanism = context.mechanism(), rounds = round, "acceptor handshake complete");
        Ok(())
    }
}

impl Default for Acceptor {
    fn default() -> Self {
        Self::new()
    }
}

// Best effort: tell the initiator to stop waiting. Carries no reason.
async fn reject<F>(io: &mut F)
where
    F: FrameIo + ?Sized,
{
    let msg = HandshakeMessage::new(HandshakeStatus::Error, Vec::new());
    if let Err(e) = io.write_message(&msg).await {
        debug!(error = %e, "could not send error status to peer");
    }
}
