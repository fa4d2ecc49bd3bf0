use tokio::io::{self, AsyncWriteExt, DuplexStream};

use crate::{
    error::AuthCause,
    framing::{FrameIo, FrameLimits, FramingError, LengthPrefixedFrameIo},
    handshake::{
        test_context::{ScriptedContext, Step},
        Acceptor, AcceptorState,
    },
    protocol::HandshakeStatus,
};

fn link() -> (LengthPrefixedFrameIo<DuplexStream>, LengthPrefixedFrameIo<DuplexStream>) {
    let (a, b) = io::duplex(1 << 16);
    (
        LengthPrefixedFrameIo::new(a, FrameLimits::DEFAULT),
        LengthPrefixedFrameIo::new(b, FrameLimits::DEFAULT),
    )
}

#[tokio::test]
async fn completes_in_one_round_with_success_frame() {
    let (mut local, mut peer) = link();
    let (ctx, probe) = ScriptedContext::new([Step::ReplyAndComplete(Some(b"rspauth".to_vec()))]);
    let ctx = ctx.with_peer("test");

    let mut acceptor = Acceptor::new();
    let peer_side = async {
        peer.write_response(b"initial").await.unwrap();
        peer.read_message().await.unwrap()
    };
    let (result, reply) = tokio::join!(acceptor.run(&mut local, ctx.boxed()), peer_side);

    result.unwrap();
    assert_eq!(reply.status(), HandshakeStatus::Success);
    assert_eq!(reply.payload(), b"rspauth");
    assert_eq!(acceptor.state(), AcceptorState::Done);
    assert_eq!(acceptor.peer_identity(), Some("test"));
    assert_eq!(probe.inputs(), vec![b"initial".to_vec()]);
    assert_eq!(probe.disposed(), 1);
}

#[tokio::test]
async fn continue_frames_until_context_completes() {
    let (mut local, mut peer) = link();
    let (ctx, probe) = ScriptedContext::new([
        Step::Reply(Some(b"challenge".to_vec())),
        Step::ReplyAndComplete(None),
    ]);

    let mut acceptor = Acceptor::new();
    let peer_side = async {
        peer.write_response(b"").await.unwrap();
        let first = peer.read_message().await.unwrap();
        peer.write_response(b"answer").await.unwrap();
        let last = peer.read_message().await.unwrap();
        (first, last)
    };
    let (result, (first, last)) = tokio::join!(acceptor.run(&mut local, ctx.boxed()), peer_side);

    result.unwrap();
    assert_eq!(first.status(), HandshakeStatus::Continue);
    assert_eq!(first.payload(), b"challenge");
    // A missing final token still goes out as a zero-length SUCCESS frame.
    assert_eq!(last.status(), HandshakeStatus::Success);
    assert!(last.payload().is_empty());
    assert_eq!(probe.inputs(), vec![Vec::new(), b"answer".to_vec()]);
    assert_eq!(probe.disposed(), 1);
}

#[tokio::test]
async fn missing_challenge_is_sent_as_empty_continue() {
    let (mut local, mut peer) = link();
    let (ctx, _probe) = ScriptedContext::new([Step::Reply(None), Step::ReplyAndComplete(None)]);

    let mut acceptor = Acceptor::new();
    let peer_side = async {
        peer.write_response(b"").await.unwrap();
        let first = peer.read_message().await.unwrap();
        peer.write_response(b"").await.unwrap();
        peer.read_message().await.unwrap();
        first
    };
    let (result, first) = tokio::join!(acceptor.run(&mut local, ctx.boxed()), peer_side);

    result.unwrap();
    assert_eq!(first.status(), HandshakeStatus::Continue);
    assert!(first.payload().is_empty());
}

#[tokio::test]
async fn context_failure_sends_error_status_and_disposes_once() {
    let (mut local, mut peer) = link();
    let (ctx, probe) = ScriptedContext::new([Step::Fail]);

    let mut acceptor = Acceptor::new();
    let peer_side = async {
        peer.write_response(b"bogus").await.unwrap();
        peer.read_message().await.unwrap()
    };
    let (result, reply) = tokio::join!(acceptor.run(&mut local, ctx.boxed()), peer_side);

    let err = result.unwrap_err();
    assert!(matches!(err.cause(), AuthCause::Context(_)));
    assert_eq!(acceptor.state(), AcceptorState::Failed);
    assert_eq!(acceptor.peer_identity(), None);
    assert_eq!(reply.status(), HandshakeStatus::Error);
    assert!(reply.payload().is_empty());
    assert_eq!(probe.disposed(), 1);
}

#[tokio::test]
async fn peer_closing_early_fails_and_disposes_once() {
    let (mut local, peer) = link();
    let (ctx, probe) = ScriptedContext::new([Step::Reply(None)]);
    drop(peer);

    let mut acceptor = Acceptor::new();
    let err = acceptor.run(&mut local, ctx.boxed()).await.unwrap_err();

    assert!(matches!(err.cause(), AuthCause::Framing(FramingError::UnexpectedEof)));
    assert!(probe.inputs().is_empty());
    assert_eq!(probe.disposed(), 1);
}

#[tokio::test]
async fn negative_length_from_peer_is_rejected() {
    let (mut local, peer) = link();
    let (ctx, probe) = ScriptedContext::new([Step::Reply(None)]);

    let mut raw = peer.into_inner();
    raw.write_all(&(-5i32).to_be_bytes()).await.unwrap();

    let mut acceptor = Acceptor::new();
    let err = acceptor.run(&mut local, ctx.boxed()).await.unwrap_err();

    assert!(matches!(err.cause(), AuthCause::Framing(FramingError::NegativeLength(-5))));
    assert_eq!(probe.disposed(), 1);
}
