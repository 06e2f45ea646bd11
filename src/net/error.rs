// Narrator error taxonomy
//
// Every failure a run can hit is mapped to one of four kinds, decided only by
// the OS error that came back. The Display text of each kind is what ends up
// in the ERROR event.

use std::io::{self, ErrorKind};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarratorError {
    /// Host name could not be resolved to an IPv4 address
    #[error("NameResolutionError: cannot resolve {host}: {reason}")]
    NameResolution { host: String, reason: String },

    /// No answer from the remote end within the configured timeout
    #[error("ConnectTimeout: no response from {addr} within {}s ({source})", .timeout.as_secs_f32())]
    ConnectTimeout {
        addr: String,
        timeout: Duration,
        #[source]
        source: io::Error,
    },

    /// The remote end actively refused the connection
    #[error("ConnectionRefused: {addr} refused the connection ({source})")]
    ConnectionRefused {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Any other socket-level failure
    #[error("GenericSocketError: {0}")]
    Socket(#[from] io::Error),

    /// Rejected target configuration (never produced by a run)
    #[error("invalid connection target: {0}")]
    InvalidTarget(String),
}

impl NarratorError {
    /// Classify an error returned by connect()
    pub fn from_connect(err: io::Error, addr: impl ToString, timeout: Duration) -> Self {
        match err.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => NarratorError::ConnectTimeout {
                addr: addr.to_string(),
                timeout,
                source: err,
            },
            ErrorKind::ConnectionRefused => NarratorError::ConnectionRefused {
                addr: addr.to_string(),
                source: err,
            },
            _ => NarratorError::Socket(err),
        }
    }

    /// Short kind name, as it appears at the start of the message
    pub fn kind_name(&self) -> &'static str {
        match self {
            NarratorError::NameResolution { .. } => "NameResolutionError",
            NarratorError::ConnectTimeout { .. } => "ConnectTimeout",
            NarratorError::ConnectionRefused { .. } => "ConnectionRefused",
            NarratorError::Socket(_) => "GenericSocketError",
            NarratorError::InvalidTarget(_) => "InvalidTarget",
        }
    }
}
