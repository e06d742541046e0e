//! Error types for the control channel and the request encoder.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single request/response exchange with the daemon.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Nothing is listening at the endpoint: the socket file is missing or
    /// the connection was refused.
    #[error(
        "reminderd socket not found at {}; is the daemon running?",
        .endpoint.display()
    )]
    Unavailable {
        endpoint: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Any other transport failure while connecting, writing, or reading.
    #[error("I/O error talking to reminderd")]
    Io(#[from] io::Error),
}

impl ChannelError {
    /// Classify a failed connect attempt.
    pub fn from_connect(endpoint: impl Into<PathBuf>, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => Self::Unavailable {
                endpoint: endpoint.into(),
                source: err,
            },
            _ => Self::Io(err),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// A command that cannot be represented on the line-based wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("{field} must not contain a line break")]
    EmbeddedNewline { field: &'static str },
}
