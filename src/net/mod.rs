// Connection lifecycle narration module
//
// Drives one outbound TCP connection through socket(), connect() and close()
// and describes each step as an Event. Nothing here touches the UI; events are
// handed to whoever iterates the Lifecycle.

pub mod error;
pub mod kernel;
pub mod narrator;
pub mod socket;

pub use error::NarratorError;
pub use kernel::ConnectionState;
pub use narrator::{Narrator, SocketApi, SocketHandle};
pub use socket::TcpSocketApi;

use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// Default remote host, matching what a browser would open first
pub const DEFAULT_HOST: &str = "google.com";

/// Default remote port (plain HTTP)
pub const DEFAULT_PORT: u16 = 80;

/// Default connect timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Narrated lifecycle phases, in the order they are reached
///
/// These are narration points inferred from socket API calls, not kernel
/// TCP states. See [`ConnectionState`] for the kernel's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecyclePhase {
    /// Before any socket exists
    Closed,
    /// socket() returned
    SocketCreated,
    /// connect() has been issued and is blocking
    SynSent,
    /// connect() returned successfully
    Established,
    /// close() returned
    ClosedFinal,
    /// Terminal failure; the run is over
    Error,
}

impl LifecyclePhase {
    /// The success path, in order
    pub const SUCCESS_PATH: [LifecyclePhase; 5] = [
        LifecyclePhase::Closed,
        LifecyclePhase::SocketCreated,
        LifecyclePhase::SynSent,
        LifecyclePhase::Established,
        LifecyclePhase::ClosedFinal,
    ];

    /// Next phase on the success path, `None` for terminal phases
    pub fn next(self) -> Option<LifecyclePhase> {
        match self {
            LifecyclePhase::Closed => Some(LifecyclePhase::SocketCreated),
            LifecyclePhase::SocketCreated => Some(LifecyclePhase::SynSent),
            LifecyclePhase::SynSent => Some(LifecyclePhase::Established),
            LifecyclePhase::Established => Some(LifecyclePhase::ClosedFinal),
            LifecyclePhase::ClosedFinal | LifecyclePhase::Error => None,
        }
    }

    /// Whether `to` is a legal successor of `self`
    pub fn can_transition_to(self, to: LifecyclePhase) -> bool {
        match to {
            LifecyclePhase::Error => !self.is_terminal(),
            _ => self.next() == Some(to),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LifecyclePhase::ClosedFinal | LifecyclePhase::Error)
    }

    /// Label shown in the state panel
    pub fn label(self) -> &'static str {
        match self {
            LifecyclePhase::Closed => "CLOSED",
            LifecyclePhase::SocketCreated => "SOCKET CREATED",
            LifecyclePhase::SynSent => "SYN-SENT (connect() in progress)",
            LifecyclePhase::Established => "ESTABLISHED (handshake complete)",
            LifecyclePhase::ClosedFinal => "CLOSED (connection terminated)",
            LifecyclePhase::Error => "ERROR",
        }
    }

    /// Short label for compact views (phase ladder)
    pub fn short_label(self) -> &'static str {
        match self {
            LifecyclePhase::Closed => "CLOSED",
            LifecyclePhase::SocketCreated => "SOCKET CREATED",
            LifecyclePhase::SynSent => "SYN-SENT",
            LifecyclePhase::Established => "ESTABLISHED",
            LifecyclePhase::ClosedFinal => "CLOSED",
            LifecyclePhase::Error => "ERROR",
        }
    }

    /// The socket API call issued to reach this phase, if any
    pub fn socket_call(self, target: &ConnectionTarget) -> Option<String> {
        match self {
            LifecyclePhase::SocketCreated => Some("socket(AF_INET, SOCK_STREAM)".to_string()),
            LifecyclePhase::SynSent => Some(format!("connect({})", target)),
            LifecyclePhase::ClosedFinal => Some("close()".to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One narrated step of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub phase: LifecyclePhase,
    pub message: String,
    pub timestamp: DateTime<Local>,
    /// Kernel TCP state observed for this socket when the event was emitted
    pub kernel_state: Option<ConnectionState>,
}

impl Event {
    pub fn new(phase: LifecyclePhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
            timestamp: Local::now(),
            kernel_state: None,
        }
    }

    pub fn error(err: &NarratorError) -> Self {
        Self::new(LifecyclePhase::Error, err.to_string())
    }

    pub fn with_kernel_state(mut self, state: Option<ConnectionState>) -> Self {
        self.kernel_state = state;
        self
    }

    pub fn is_error(&self) -> bool {
        self.phase == LifecyclePhase::Error
    }
}

/// Where a run connects to. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ConnectionTarget {
    /// Build a target, rejecting port 0 and a zero timeout
    pub fn new(
        host: impl Into<String>,
        port: u16,
        timeout: Duration,
    ) -> Result<Self, NarratorError> {
        if port == 0 {
            return Err(NarratorError::InvalidTarget("port must be in 1..=65535".to_string()));
        }
        if timeout.is_zero() {
            return Err(NarratorError::InvalidTarget("timeout must be non-zero".to_string()));
        }
        Ok(Self {
            host: host.into(),
            port,
            timeout,
        })
    }
}

impl Default for ConnectionTarget {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path_follows_next() {
        let mut phase = LifecyclePhase::Closed;
        let mut walked = vec![phase];
        while let Some(next) = phase.next() {
            walked.push(next);
            phase = next;
        }
        assert_eq!(walked, LifecyclePhase::SUCCESS_PATH.to_vec());
    }

    #[test]
    fn test_transitions() {
        assert!(LifecyclePhase::Closed.can_transition_to(LifecyclePhase::SocketCreated));
        assert!(LifecyclePhase::SynSent.can_transition_to(LifecyclePhase::Error));
        assert!(!LifecyclePhase::Closed.can_transition_to(LifecyclePhase::SynSent));
        assert!(!LifecyclePhase::Established.can_transition_to(LifecyclePhase::SynSent));
        assert!(!LifecyclePhase::ClosedFinal.can_transition_to(LifecyclePhase::Error));
        assert!(!LifecyclePhase::Error.can_transition_to(LifecyclePhase::Error));
    }

    #[test]
    fn test_labels_match_narration() {
        assert_eq!(LifecyclePhase::ClosedFinal.label(), "CLOSED (connection terminated)");
        assert_eq!(LifecyclePhase::SynSent.label(), "SYN-SENT (connect() in progress)");
        assert_eq!(LifecyclePhase::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_socket_calls() {
        let target = ConnectionTarget::default();
        assert_eq!(LifecyclePhase::Closed.socket_call(&target), None);
        assert_eq!(
            LifecyclePhase::SynSent.socket_call(&target).as_deref(),
            Some("connect(google.com:80)")
        );
        assert_eq!(
            LifecyclePhase::ClosedFinal.socket_call(&target).as_deref(),
            Some("close()")
        );
    }

    #[test]
    fn test_target_defaults() {
        let target = ConnectionTarget::default();
        assert_eq!(target.host, "google.com");
        assert_eq!(target.port, 80);
        assert_eq!(target.timeout, Duration::from_secs(5));
        assert_eq!(target.to_string(), "google.com:80");
    }

    #[test]
    fn test_target_validation() {
        assert!(ConnectionTarget::new("localhost", 0, Duration::from_secs(1)).is_err());
        assert!(ConnectionTarget::new("localhost", 80, Duration::ZERO).is_err());
        let target = ConnectionTarget::new("localhost", 65535, Duration::from_secs(1));
        assert!(target.is_ok());
    }
}
