use thiserror::Error;

use spotwire_proto::ProtoError;

use crate::token::TokenError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not connected")]
    NotConnected,
    #[error("already connected")]
    AlreadyConnected,
    #[error("application is not authenticated")]
    AppNotAuthenticated,
    #[error("no trading account is authenticated")]
    AccountNotAuthenticated,
    #[error("client_msg_id already in flight: {0}")]
    DuplicateClientMsgId(String),
    #[error("response timed out")]
    Timeout,
    #[error("connection lost: {0}")]
    ConnectionLost(String),
    #[error("server rejected request: code={code}, description={description}")]
    Server { code: String, description: String },
    #[error("unexpected response payload type: {0}")]
    UnexpectedPayload(u32),
    #[error(transparent)]
    Proto(#[from] ProtoError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),
}
