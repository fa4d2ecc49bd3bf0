use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::{
    config::QuorumAuthConfig,
    context::SecurityContextFactory,
    credential::{CredentialProvider, LoginCache},
    error::AuthenticationFailure,
    framing::LengthPrefixedFrameIo,
    handshake::{Acceptor, Initiator},
    mechanism::{MechanismSelector, NativeTicketSource, NoNativeTickets},
};

/// Everything a peer needs to authenticate its quorum connections.
///
/// Built once by whoever owns the listening/connecting side and shared (e.g.
/// behind an `Arc`) with every connection handler. Logins happen lazily, at
/// most once per side.
pub struct QuorumAuth {
    config: QuorumAuthConfig,
    logins: LoginCache,
    factory: Arc<dyn SecurityContextFactory>,
    native: Arc<dyn NativeTicketSource>,
}

impl QuorumAuth {
    pub fn new(
        config: QuorumAuthConfig,
        provider: Arc<dyn CredentialProvider>,
        factory: Arc<dyn SecurityContextFactory>,
    ) -> Self {
        let logins = LoginCache::new(
            provider,
            config.client_login_context.clone(),
            config.server_login_context.clone(),
        );
        Self {
            config,
            logins,
            factory,
            native: Arc::new(NoNativeTickets),
        }
    }

    pub fn with_native_tickets(mut self, source: Arc<dyn NativeTicketSource>) -> Self {
        self.native = source;
        self
    }

    pub fn config(&self) -> &QuorumAuthConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn logins(&self) -> &LoginCache {
        &self.logins
    }

    /// Authenticate the connecting side of a fresh peer connection.
    pub async fn authenticate_initiator<RW>(&self, io: RW) -> Result<(), AuthenticationFailure>
    where
        RW: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let credential = self.logins.client_credential().await?;
        let plan = MechanismSelector::new(&self.config, self.native.as_ref())
            .select_initiator(&credential)?;
        debug!(mechanism = plan.mechanism_name(), protocol = %plan.target.protocol, "creating initiator context");

        let context = self.factory.create_initiator(&plan, &credential).await?;

        let mut framer = LengthPrefixedFrameIo::new(io, self.config.frame_limits);
        Initiator::new().run(&mut framer, context).await?;

        info!(mechanism = plan.mechanism_name(), "authenticated to quorum peer");
        Ok(())
    }

    /// Authenticate the accepting side. Returns the peer identity when the
    /// mechanism reports one.
    pub async fn authenticate_acceptor<RW>(
        &self,
        io: RW,
    ) -> Result<Option<String>, AuthenticationFailure>
    where
        RW: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let credential = self.logins.server_credential().await?;
        let plan = MechanismSelector::new(&self.config, self.native.as_ref())
            .select_acceptor(&credential)?;
        debug!(mechanism = plan.mechanism_name(), protocol = %plan.target.protocol, "creating acceptor context");

        let context = self.factory.create_acceptor(&plan, &credential).await?;

        let mut framer = LengthPrefixedFrameIo::new(io, self.config.frame_limits);
        let mut acceptor = Acceptor::new();
        acceptor.run(&mut framer, context).await?;

        let peer = acceptor.peer_identity().map(str::to_owned);
        info!(mechanism = plan.mechanism_name(), peer = peer.as_deref().unwrap_or("-"), "quorum peer authenticated");
        Ok(peer)
    }
}

impl std::fmt::Debug for QuorumAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuorumAuth")
            .field("config", &self.config)
            .field("logins", &self.logins)
            .finish_non_exhaustive()
    }
}
