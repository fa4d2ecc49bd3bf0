/*
    quorum-auth-core
        mutual authentication between quorum peers, run once per
        peer-to-peer connection before any cluster traffic.
 */

pub mod error;
pub mod config;

pub mod framing;
pub mod protocol;
pub mod identity;
pub mod credential;
pub mod context;
pub mod mechanism;
pub mod handshake;

mod auth;

pub use auth::QuorumAuth;
pub use config::QuorumAuthConfig;
pub use error::{AuthCause, AuthenticationFailure};

#[cfg(test)]
mod lib_tests;
