//! Shared error type across greetbus crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// No consumer registered on the requested address.
    NoHandlers,
    /// The consumer dropped the request without replying.
    ReplyDropped,
    /// The reply did not arrive within the configured bound.
    Timeout,
    /// The requester stopped waiting before the reply was sent.
    Abandoned,
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NoHandlers => "NO_HANDLERS",
            ClientCode::ReplyDropped => "REPLY_DROPPED",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Abandoned => "ABANDONED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GreetBusError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum GreetBusError {
    #[error("no handlers for address: {0}")]
    NoHandlers(String),
    #[error("reply dropped by consumer of address: {0}")]
    ReplyDropped(String),
    #[error("no reply from {address} within {after_ms}ms")]
    Timeout { address: String, after_ms: u64 },
    #[error("requester on {0} no longer waiting")]
    Abandoned(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl GreetBusError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GreetBusError::NoHandlers(_) => ClientCode::NoHandlers,
            GreetBusError::ReplyDropped(_) => ClientCode::ReplyDropped,
            GreetBusError::Timeout { .. } => ClientCode::Timeout,
            GreetBusError::Abandoned(_) => ClientCode::Abandoned,
            GreetBusError::BadRequest(_) => ClientCode::BadRequest,
            GreetBusError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GreetBusError::Internal(_) => ClientCode::Internal,
        }
    }
}
