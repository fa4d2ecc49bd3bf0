use tokio::io::{self, AsyncReadExt, AsyncWriteExt, DuplexStream};

use crate::framing::{
    encode_message, encode_response, FrameIo, FrameLimits, FramingError, LengthPrefixedFrameIo,
};
use crate::protocol::{HandshakeMessage, HandshakeStatus, ProtocolError};

fn pair() -> (LengthPrefixedFrameIo<DuplexStream>, LengthPrefixedFrameIo<DuplexStream>) {
    let (a, b) = io::duplex(1 << 18);
    (
        LengthPrefixedFrameIo::new(a, FrameLimits::DEFAULT),
        LengthPrefixedFrameIo::new(b, FrameLimits::DEFAULT),
    )
}

// Feed raw bytes to a reader, then close the writing half.
async fn reader_over(bytes: &[u8], limits: FrameLimits) -> LengthPrefixedFrameIo<DuplexStream> {
    let (mut a, b) = io::duplex(1 << 18);
    a.write_all(bytes).await.unwrap();
    drop(a);
    LengthPrefixedFrameIo::new(b, limits)
}

#[tokio::test]
async fn message_round_trip_for_small_and_large_payloads() {
    let (mut writer, mut reader) = pair();

    for (status, len) in [
        (HandshakeStatus::Continue, 0usize),
        (HandshakeStatus::Success, 1),
        (HandshakeStatus::Error, 64 * 1024),
    ] {
        let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let msg = HandshakeMessage::new(status, payload);

        writer.write_message(&msg).await.unwrap();
        let got = reader.read_message().await.unwrap();
        assert_eq!(got, msg);
    }
}

#[tokio::test]
async fn response_round_trip_for_small_and_large_payloads() {
    let (mut writer, mut reader) = pair();

    for len in [0usize, 1, 64 * 1024] {
        let payload = vec![0xA5u8; len];
        writer.write_response(&payload).await.unwrap();
        assert_eq!(reader.read_response().await.unwrap(), payload);
    }
}

#[test]
fn encoded_layout_is_status_then_length_then_payload() {
    let msg = HandshakeMessage::new(HandshakeStatus::Success, b"ok".to_vec());
    let bytes = encode_message(&msg, FrameLimits::DEFAULT).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 2, b'o', b'k']);

    let bytes = encode_response(b"hey", FrameLimits::DEFAULT).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 3, b'h', b'e', b'y']);
}

#[tokio::test]
async fn response_frame_has_no_status_field() {
    let (mut a, b) = io::duplex(64);
    let mut writer = LengthPrefixedFrameIo::new(b, FrameLimits::DEFAULT);

    writer.write_response(&[]).await.unwrap();
    drop(writer);

    let mut raw = Vec::new();
    a.read_to_end(&mut raw).await.unwrap();
    assert_eq!(raw, vec![0, 0, 0, 0]);
}

#[tokio::test]
async fn unexpected_eof_reading_status() {
    let mut reader = reader_over(&[0, 0], FrameLimits::DEFAULT).await;
    let err = reader.read_message().await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));
}

#[tokio::test]
async fn unexpected_eof_reading_length() {
    // Full status ordinal, then half of the length field.
    let mut reader = reader_over(&[0, 0, 0, 0, 0, 0], FrameLimits::DEFAULT).await;
    let err = reader.read_message().await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));

    let mut reader = reader_over(&[0, 0, 0], FrameLimits::DEFAULT).await;
    let err = reader.read_response().await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));
}

#[tokio::test]
async fn unexpected_eof_reading_payload() {
    // Claim 5 bytes, deliver 2.
    let mut bytes = 5i32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&[1, 2]);

    let mut reader = reader_over(&bytes, FrameLimits::DEFAULT).await;
    let err = reader.read_response().await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));

    let mut framed = 0i32.to_be_bytes().to_vec();
    framed.extend_from_slice(&bytes);
    let mut reader = reader_over(&framed, FrameLimits::DEFAULT).await;
    let err = reader.read_message().await.unwrap_err();
    assert!(matches!(err, FramingError::UnexpectedEof));
}

#[tokio::test]
async fn rejects_negative_length() {
    let mut reader = reader_over(&(-1i32).to_be_bytes(), FrameLimits::DEFAULT).await;
    let err = reader.read_response().await.unwrap_err();
    assert!(matches!(err, FramingError::NegativeLength(-1)));
}

#[tokio::test]
async fn rejects_status_ordinal_outside_enumeration() {
    for bad in [3i32, -1, 99] {
        let mut bytes = bad.to_be_bytes().to_vec();
        bytes.extend_from_slice(&0i32.to_be_bytes());

        let mut reader = reader_over(&bytes, FrameLimits::DEFAULT).await;
        let err = reader.read_message().await.unwrap_err();
        match err {
            FramingError::Protocol(ProtocolError::InvalidStatus(got)) => assert_eq!(got, bad),
            other => panic!("expected InvalidStatus, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn rejects_oversized_frame_length() {
    let limits = FrameLimits { max_payload_len: 8 };

    let mut bytes = 9i32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&[0u8; 9]);

    let mut reader = reader_over(&bytes, limits).await;
    let err = reader.read_response().await.unwrap_err();
    match err {
        FramingError::FrameTooLarge { len, max } => {
            assert_eq!(len, 9);
            assert_eq!(max, 8);
        }
        other => panic!("expected FrameTooLarge, got {other:?}"),
    }
}

#[test]
fn encode_rejects_payload_over_limit() {
    let limits = FrameLimits { max_payload_len: 4 };
    let err = encode_response(&[0u8; 5], limits).unwrap_err();
    assert!(matches!(err, FramingError::FrameTooLarge { len: 5, max: 4 }));

    let msg = HandshakeMessage::new(HandshakeStatus::Continue, vec![0u8; 5]);
    assert!(encode_message(&msg, limits).is_err());
}

#[test]
fn wire_len_never_produces_a_negative_length() {
    let limits = FrameLimits { max_payload_len: u32::MAX };
    let err = limits.wire_len(i32::MAX as usize + 1).unwrap_err();
    assert!(matches!(err, FramingError::FrameTooLarge { .. }));
    assert_eq!(limits.wire_len(0).unwrap(), 0);
}
