//! Length-prefixed frame I/O.
//!
//! Each frame is a 4-byte big-endian length followed by exactly that many
//! bytes of envelope. The length prefix and payload are flushed together so
//! a frame is never split across writes.

use std::io;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::ProtoError;

pub const DEFAULT_MAX_FRAME_BYTES: u32 = 15_000_000;

/// Reads one frame, tolerating short reads.
///
/// EOF before or inside a frame maps to [`ProtoError::ConnectionClosed`];
/// a length above `max_frame_bytes` fails before the body is read.
pub async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
    max_frame_bytes: u32,
) -> Result<Vec<u8>, ProtoError> {
    let mut len_buf = [0_u8; 4];
    read_exact_or_closed(reader, &mut len_buf).await?;

    let len = u32::from_be_bytes(len_buf);
    if len > max_frame_bytes {
        return Err(ProtoError::FrameTooLarge(len));
    }

    let mut payload = vec![0_u8; len as usize];
    read_exact_or_closed(reader, &mut payload).await?;
    Ok(payload)
}

/// Writes one frame as a single buffer and flushes it.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ProtoError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| ProtoError::FrameTooLarge(u32::MAX))?;

    let mut frame = BytesMut::with_capacity(4 + payload.len());
    frame.put_u32(len);
    frame.put_slice(payload);

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

async fn read_exact_or_closed<R: AsyncRead + Unpin>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<(), ProtoError> {
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            Err(ProtoError::ConnectionClosed)
        }
        Err(err) => Err(ProtoError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncWriteExt;

    use super::*;

    #[tokio::test]
    async fn frame_round_trip() {
        let (mut tx, mut rx) = tokio::io::duplex(1024);

        write_frame(&mut tx, b"envelope bytes").await.expect("write");
        let payload = read_frame(&mut rx, DEFAULT_MAX_FRAME_BYTES).await.expect("read");

        assert_eq!(payload, b"envelope bytes");
    }

    #[tokio::test]
    async fn empty_frame_round_trip() {
        let (mut tx, mut rx) = tokio::io::duplex(64);

        write_frame(&mut tx, b"").await.expect("write");
        let payload = read_frame(&mut rx, DEFAULT_MAX_FRAME_BYTES).await.expect("read");

        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn oversized_length_is_rejected_before_body() {
        let (mut tx, mut rx) = tokio::io::duplex(64);

        // Length prefix claims 2 MiB; only the prefix is ever written.
        tx.write_all(&2_097_152_u32.to_be_bytes()).await.expect("write prefix");

        let err = read_frame(&mut rx, 1024).await.expect_err("must fail");
        match err {
            ProtoError::FrameTooLarge(len) => assert_eq!(len, 2_097_152),
            other => panic!("expected FrameTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn eof_at_frame_boundary_is_connection_closed() {
        let (tx, mut rx) = tokio::io::duplex(64);
        drop(tx);

        let err = read_frame(&mut rx, 1024).await.expect_err("must fail");
        assert!(matches!(err, ProtoError::ConnectionClosed));
    }

    #[tokio::test]
    async fn eof_inside_frame_is_connection_closed() {
        let (mut tx, mut rx) = tokio::io::duplex(64);

        tx.write_all(&10_u32.to_be_bytes()).await.expect("write prefix");
        tx.write_all(b"abc").await.expect("write partial body");
        drop(tx);

        let err = read_frame(&mut rx, 1024).await.expect_err("must fail");
        assert!(matches!(err, ProtoError::ConnectionClosed));
    }

    #[tokio::test]
    async fn frames_are_read_in_write_order() {
        let (mut tx, mut rx) = tokio::io::duplex(1024);

        write_frame(&mut tx, b"first").await.expect("write");
        write_frame(&mut tx, b"second").await.expect("write");

        assert_eq!(read_frame(&mut rx, 1024).await.expect("read"), b"first");
        assert_eq!(read_frame(&mut rx, 1024).await.expect("read"), b"second");
    }
}
