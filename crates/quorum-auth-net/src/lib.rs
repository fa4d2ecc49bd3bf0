/*
    quorum-auth-net
      - Tokio TCP glue: run the quorum peer handshake on fresh connections.
      - The returned stream carries application traffic in the clear.
*/
mod conn;
mod error;

pub use conn::{accept_tcp, authenticate_accepted, connect_tcp};
pub use error::NetError;
