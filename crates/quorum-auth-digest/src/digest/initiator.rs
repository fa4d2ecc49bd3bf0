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
    token::{is_token_safe, Directives, TokenWriter},
    ALGORITHM,
};

enum State {
    AwaitChallenge,
    AwaitProof {
        nonce: Zeroizing<String>,
        cnonce: Zeroizing<String>,
    },
    Complete,
    Disposed,
}

/// Connecting side of the shared-secret exchange.
///
/// Sends nothing up front, answers the acceptor's challenge with a keyed
/// proof, then checks the acceptor's counter-proof.
pub struct DigestInitiator {
    username: String,
    password: Password,
    protocol: String,
    realm: String,
    state: State,
}

impl DigestInitiator {
    pub fn new(
        username: String,
        password: Password,
        protocol: &str,
        realm: &str,
    ) -> Result<Self, ContextError> {
        if !is_token_safe(&username) {
            return Err(ContextError::Creation(format!(
                "username {username:?} is empty or contains '\"' or ','"
            )));
        }
        Ok(Self {
            username,
            password,
            protocol: protocol.to_owned(),
            realm: realm.to_owned(),
            state: State::AwaitChallenge,
        })
    }

    fn answer_challenge(&mut self, input: &[u8]) -> Result<Vec<u8>, ContextError> {
        let challenge = Directives::parse(input)?;

        let realm = challenge.get("realm")?;
        if realm != self.realm {
            return Err(ContextError::Evaluation(format!(
                "challenge realm {realm:?} does not match {:?}",
                self.realm
            )));
        }
        let algorithm = challenge.get("algorithm")?;
        if algorithm != ALGORITHM {
            return Err(ContextError::Evaluation(format!("unsupported algorithm {algorithm:?}")));
        }

        let nonce = Zeroizing::new(challenge.get("nonce")?.to_owned());
        let cnonce = Zeroizing::new(mac::random_nonce());
        let response = mac::proof(
            &self.password,
            INITIATOR_LABEL,
            &Binding {
                protocol: &self.protocol,
                realm: &self.realm,
                nonce: &nonce,
                cnonce: &cnonce,
                username: &self.username,
            },
        )?;

        let token = TokenWriter::new()
            .quoted("username", &self.username)
            .quoted("realm", &self.realm)
            .plain("cnonce", &cnonce)
            .plain("response", &hex::encode(response))
            .finish();

        debug!(username = %self.username, "answered shared-secret challenge");
        self.state = State::AwaitProof { nonce, cnonce };
        Ok(token)
    }

    fn check_proof(&self, input: &[u8], nonce: &str, cnonce: &str) -> Result<(), ContextError> {
        let claimed = Directives::parse(input)?.get_hex("rspauth")?;
        mac::verify(
            &self.password,
            ACCEPTOR_LABEL,
            &Binding {
                protocol: &self.protocol,
                realm: &self.realm,
                nonce,
                cnonce,
                username: &self.username,
            },
            &claimed,
        )
    }
}

#[async_trait]
impl SecurityContext for DigestInitiator {
    fn mechanism(&self) -> &'static str {
        SHARED_SECRET_MECHANISM
    }

    fn is_complete(&self) -> bool {
        matches!(self.state, State::Complete)
    }

    async fn evaluate(&mut self, input: &[u8]) -> Result<Option<Vec<u8>>, ContextError> {
        match &self.state {
            State::AwaitChallenge => self.answer_challenge(input).map(Some),
            State::AwaitProof { nonce, cnonce } => {
                self.check_proof(input, nonce, cnonce)?;
                self.state = State::Complete;
                debug!("acceptor proof verified");
                Ok(None)
            }
            State::Complete => Err(ContextError::AlreadyComplete),
            State::Disposed => Err(ContextError::Disposed),
        }
    }

    fn dispose(&mut self) -> Result<(), ContextError> {
        self.state = State::Disposed;
        Ok(())
    }
}

impl std::fmt::Debug for DigestInitiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestInitiator")
            .field("username", &self.username)
            .field("realm", &self.realm)
            .field("complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}
