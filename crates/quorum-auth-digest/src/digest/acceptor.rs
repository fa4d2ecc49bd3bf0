use std::collections::BTreeMap;

use async_trait::async_trait;
use quorum_auth_core::{
    context::{ContextError, SecurityContext},
    credential::Password,
    mechanism::SHARED_SECRET_MECHANISM,
};
use tracing::debug;
use zeroize::Zeroizing;

use super::{
    mac::{self, Binding, ACCEPTOR_LABEL, INITIATOR_LABEL},
    token::{Directives, TokenWriter},
    ALGORITHM,
};

enum State {
    Start,
    AwaitResponse { nonce: Zeroizing<String> },
    Complete,
    Disposed,
}

/// Accepting side of the shared-secret exchange. Verifies the initiator
/// against a table of user secrets.
pub struct DigestAcceptor {
    users: BTreeMap<String, Password>,
    protocol: String,
    realm: String,
    peer: Option<String>,
    state: State,
}

impl DigestAcceptor {
    pub fn new(users: BTreeMap<String, Password>, protocol: &str, realm: &str) -> Self {
        Self {
            users,
            protocol: protocol.to_owned(),
            realm: realm.to_owned(),
            peer: None,
            state: State::Start,
        }
    }

    fn challenge(&mut self, input: &[u8]) -> Result<Vec<u8>, ContextError> {
        if !input.is_empty() {
            return Err(ContextError::Evaluation(
                "unexpected initial response for shared-secret mechanism".into(),
            ));
        }

        let nonce = Zeroizing::new(mac::random_nonce());
        let token = TokenWriter::new()
            .quoted("realm", &self.realm)
            .plain("nonce", &nonce)
            .quoted("algorithm", ALGORITHM)
            .finish();

        self.state = State::AwaitResponse { nonce };
        Ok(token)
    }

    fn verify_response(&self, input: &[u8], nonce: &str) -> Result<(String, Vec<u8>), ContextError> {
        let response = Directives::parse(input)?;

        let realm = response.get("realm")?;
        if realm != self.realm {
            return Err(ContextError::Evaluation(format!(
                "response realm {realm:?} does not match {:?}",
                self.realm
            )));
        }

        let username = response.get("username")?;
        let password = self
            .users
            .get(username)
            .ok_or_else(|| ContextError::Rejected(format!("unknown user {username:?}")))?;

        let binding = Binding {
            protocol: &self.protocol,
            realm: &self.realm,
            nonce,
            cnonce: response.get("cnonce")?,
            username,
        };
        mac::verify(password, INITIATOR_LABEL, &binding, &response.get_hex("response")?)?;

        let rspauth = mac::proof(password, ACCEPTOR_LABEL, &binding)?;
        let token = TokenWriter::new()
            .plain("rspauth", &hex::encode(rspauth))
            .finish();
        Ok((username.to_owned(), token))
    }
}

#[async_trait]
impl SecurityContext for DigestAcceptor {
    fn mechanism(&self) -> &'static str {
        SHARED_SECRET_MECHANISM
    }

    fn is_complete(&self) -> bool {
        matches!(self.state, State::Complete)
    }

    async fn evaluate(&mut self, input: &[u8]) -> Result<Option<Vec<u8>>, ContextError> {
        match &self.state {
            State::Start => self.challenge(input).map(Some),
            State::AwaitResponse { nonce } => {
                let (username, token) = self.verify_response(input, nonce)?;
                debug!(username = %username, "shared-secret peer verified");
                self.peer = Some(username);
                self.state = State::Complete;
                Ok(Some(token))
            }
            State::Complete => Err(ContextError::AlreadyComplete),
            State::Disposed => Err(ContextError::Disposed),
        }
    }

    fn peer_identity(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    fn dispose(&mut self) -> Result<(), ContextError> {
        self.state = State::Disposed;
        self.users.clear();
        Ok(())
    }
}

impl std::fmt::Debug for DigestAcceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestAcceptor")
            .field("users", &self.users.len())
            .field("realm", &self.realm)
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}
