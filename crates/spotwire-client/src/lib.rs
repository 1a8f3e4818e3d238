pub mod config;
mod correlation;
pub mod endpoints;
pub mod error;
pub mod requests;
pub mod session;
mod tls;
pub mod token;
mod transport;

pub use config::{Config, Credentials, HostKind};
pub use error::ClientError;
pub use requests::{AmendOrderRequest, NewOrderRequest};
pub use session::{Session, SessionState};
pub use spotwire_proto as proto;
pub use token::{TokenError, TokenManager, TokenSet};
