/*
    quorum-auth-digest
      - Shared-secret implementation of quorum-auth-core's SecurityContextFactory.
      - Challenge/response proofs are HMAC-SHA256 over the exchanged nonces.
      - Ticket (GSSAPI) contexts are reported as unsupported.
*/
mod digest;

use async_trait::async_trait;
use quorum_auth_core::{
    context::{ContextError, SecurityContext, SecurityContextFactory},
    credential::Credential,
    mechanism::{AcceptorMechanism, AcceptorPlan, InitiatorPlan, Mechanism, TICKET_MECHANISM},
};
use tracing::warn;

pub use digest::{DigestAcceptor, DigestInitiator};

/// Security backend for the shared-secret mechanism.
#[derive(Debug, Default, Clone)]
pub struct DigestContextFactory;

impl DigestContextFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecurityContextFactory for DigestContextFactory {
    async fn create_initiator(
        &self,
        plan: &InitiatorPlan,
        _credential: &Credential,
    ) -> Result<Box<dyn SecurityContext>, ContextError> {
        match &plan.mechanism {
            Mechanism::SharedSecret { username, password } => {
                let context = DigestInitiator::new(
                    username.clone(),
                    password.clone(),
                    &plan.target.protocol,
                    &plan.target.server_name,
                )?;
                Ok(Box::new(context))
            }
            Mechanism::Ticket(_) => Err(ContextError::UnsupportedMechanism(TICKET_MECHANISM)),
        }
    }

    async fn create_acceptor(
        &self,
        plan: &AcceptorPlan,
        credential: &Credential,
    ) -> Result<Box<dyn SecurityContext>, ContextError> {
        match &plan.mechanism {
            AcceptorMechanism::SharedSecret => {
                if credential.user_secrets().is_empty() {
                    warn!("acceptor login has no user secrets, every peer will be rejected");
                }
                Ok(Box::new(DigestAcceptor::new(
                    credential.user_secrets().clone(),
                    &plan.target.protocol,
                    &plan.target.server_name,
                )))
            }
            AcceptorMechanism::Ticket(_) => Err(ContextError::UnsupportedMechanism(TICKET_MECHANISM)),
        }
    }
}
