use async_trait::async_trait;

use crate::{
    context::ContextError,
    credential::Credential,
    mechanism::{AcceptorPlan, InitiatorPlan},
};

// Per-connection challenge/response state owned by the handshake.
// The handshake creates one, drives it once per round and disposes it
// exactly once, whatever the outcome.
#[async_trait]
pub trait SecurityContext: Send {
    // Mechanism name advertised for this context.
    fn mechanism(&self) -> &'static str;

    // Whether the initiator can produce a first token without peer input.
    fn has_initial_output(&self) -> bool {
        false
    }

    fn is_complete(&self) -> bool;

    // Consume one peer token and produce the next outbound one.
    // `None` means "nothing to say", which still goes on the wire as an empty frame.
    async fn evaluate(&mut self, input: &[u8]) -> Result<Option<Vec<u8>>, ContextError>;

    // Authenticated peer identity, once known.
    fn peer_identity(&self) -> Option<&str> {
        None
    }

    fn dispose(&mut self) -> Result<(), ContextError>;
}

// Trait boundary to the external security layer.
// Core handshake logic depends on this, never on a concrete mechanism.
#[async_trait]
pub trait SecurityContextFactory: Send + Sync {
    async fn create_initiator(
        &self,
        plan: &InitiatorPlan,
        credential: &Credential,
    ) -> Result<Box<dyn SecurityContext>, ContextError>;

    async fn create_acceptor(
        &self,
        plan: &AcceptorPlan,
        credential: &Credential,
    ) -> Result<Box<dyn SecurityContext>, ContextError>;
}
