use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{debug, info};

use quorum_auth_core::QuorumAuth;

use crate::error::NetError;

// Client-side connect + handshake over TCP.
pub async fn connect_tcp<A>(addr: A, auth: &QuorumAuth) -> Result<TcpStream, NetError>
where
    A: ToSocketAddrs,
{
    let mut stream = TcpStream::connect(addr).await?;
    let peer = stream.peer_addr()?;

    if !auth.is_enabled() {
        debug!(%peer, "quorum auth disabled, skipping handshake");
        return Ok(stream);
    }

    auth.authenticate_initiator(&mut stream).await?;
    info!(%peer, "connected to authenticated quorum peer");
    Ok(stream)
}

// Server-side handshake on a stream that has already been accepted.
// Run this on the task that owns the connection: it waits on the peer
// for as long as the peer takes.
pub async fn authenticate_accepted(
    stream: &mut TcpStream,
    auth: &QuorumAuth,
) -> Result<Option<String>, NetError> {
    let peer = stream.peer_addr()?;

    if !auth.is_enabled() {
        debug!(%peer, "quorum auth disabled, skipping handshake");
        return Ok(None);
    }

    let identity = auth.authenticate_acceptor(stream).await?;
    info!(%peer, identity = identity.as_deref().unwrap_or("-"), "accepted authenticated quorum peer");
    Ok(identity)
}

// Accept one connection and authenticate it on the caller's task.
// Servers with more than one peer should accept themselves and spawn
// `authenticate_accepted` per connection.
pub async fn accept_tcp(
    listener: &TcpListener,
    auth: &QuorumAuth,
) -> Result<(TcpStream, SocketAddr), NetError> {
    let (mut stream, peer) = listener.accept().await?;
    authenticate_accepted(&mut stream, auth).await?;
    Ok((stream, peer))
}
