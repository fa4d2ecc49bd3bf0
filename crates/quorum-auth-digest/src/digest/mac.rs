use hmac::{Hmac, Mac};
use quorum_auth_core::{context::ContextError, credential::Password};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub(crate) const INITIATOR_LABEL: &str = "initiator";
pub(crate) const ACCEPTOR_LABEL: &str = "acceptor";

const NONCE_LEN: usize = 16;

/// Everything both proofs are bound to.
pub(crate) struct Binding<'a> {
    pub protocol: &'a str,
    pub realm: &'a str,
    pub nonce: &'a str,
    pub cnonce: &'a str,
    pub username: &'a str,
}

fn keyed(password: &Password, label: &str, binding: &Binding<'_>) -> Result<HmacSha256, ContextError> {
    let mut mac = HmacSha256::new_from_slice(password.expose().as_bytes())
        .map_err(|e| ContextError::Evaluation(e.to_string()))?;

    mac.update(label.as_bytes());
    for field in [
        binding.protocol,
        binding.realm,
        binding.nonce,
        binding.cnonce,
        binding.username,
    ] {
        mac.update(b"|");
        mac.update(field.as_bytes());
    }
    Ok(mac)
}

pub(crate) fn proof(password: &Password, label: &str, binding: &Binding<'_>) -> Result<Vec<u8>, ContextError> {
    Ok(keyed(password, label, binding)?.finalize().into_bytes().to_vec())
}

// Constant-time comparison against the proof the peer claims.
pub(crate) fn verify(
    password: &Password,
    label: &str,
    binding: &Binding<'_>,
    claimed: &[u8],
) -> Result<(), ContextError> {
    keyed(password, label, binding)?
        .verify_slice(claimed)
        .map_err(|_| ContextError::Rejected(format!("{label} proof does not match")))
}

pub(crate) fn random_nonce() -> String {
    let mut bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
