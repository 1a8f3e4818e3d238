pub mod codec;
pub mod framing;
pub mod messages;

use thiserror::Error;

pub use codec::{Payload, decode, encode, extract, payload_name};
pub use framing::{DEFAULT_MAX_FRAME_BYTES, read_frame, write_frame};

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed")]
    ConnectionClosed,
    #[error("frame too large: {0} bytes")]
    FrameTooLarge(u32),
    #[error("unknown payload type: {0}")]
    UnknownPayloadType(u32),
    #[error("payload type mismatch: expected {expected}, got {actual}")]
    PayloadTypeMismatch { expected: u32, actual: u32 },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
