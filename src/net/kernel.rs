// Kernel socket table lookup
//
// Read-only peek at the OS socket table so the narration can show what the
// kernel itself reports for our connection next to the inferred phase.

use netstat2::{get_sockets_info, AddressFamilyFlags, ProtocolFlags, ProtocolSocketInfo, TcpState};
use std::fmt;
use std::net::SocketAddr;
use tracing::debug;

/// TCP connection states as reported by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Established,
    SynSent,
    SynRecv,
    FinWait1,
    FinWait2,
    TimeWait,
    Close,
    CloseWait,
    LastAck,
    Listen,
    Closing,
    Unknown,
}

impl ConnectionState {
    /// Kernel-style name (ss/netstat spelling)
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Established => "ESTABLISHED",
            ConnectionState::SynSent => "SYN_SENT",
            ConnectionState::SynRecv => "SYN_RECV",
            ConnectionState::FinWait1 => "FIN_WAIT1",
            ConnectionState::FinWait2 => "FIN_WAIT2",
            ConnectionState::TimeWait => "TIME_WAIT",
            ConnectionState::Close => "CLOSE",
            ConnectionState::CloseWait => "CLOSE_WAIT",
            ConnectionState::LastAck => "LAST_ACK",
            ConnectionState::Listen => "LISTEN",
            ConnectionState::Closing => "CLOSING",
            ConnectionState::Unknown => "UNKNOWN",
        }
    }
}

impl From<TcpState> for ConnectionState {
    #[allow(unreachable_patterns)]
    fn from(state: TcpState) -> Self {
        match state {
            TcpState::Established => ConnectionState::Established,
            TcpState::SynSent => ConnectionState::SynSent,
            TcpState::SynReceived => ConnectionState::SynRecv,
            TcpState::FinWait1 => ConnectionState::FinWait1,
            TcpState::FinWait2 => ConnectionState::FinWait2,
            TcpState::TimeWait => ConnectionState::TimeWait,
            TcpState::Closed => ConnectionState::Close,
            TcpState::CloseWait => ConnectionState::CloseWait,
            TcpState::LastAck => ConnectionState::LastAck,
            TcpState::Listen => ConnectionState::Listen,
            TcpState::Closing => ConnectionState::Closing,
            _ => ConnectionState::Unknown,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel state of the IPv4 TCP socket `local -> remote`, if it is listed
///
/// Best effort: an unreadable socket table (permissions, unsupported OS)
/// yields `None` rather than failing the run.
pub fn lookup_state(local: SocketAddr, remote: SocketAddr) -> Option<ConnectionState> {
    let sockets = match get_sockets_info(AddressFamilyFlags::IPV4, ProtocolFlags::TCP) {
        Ok(sockets) => sockets,
        Err(e) => {
            debug!(error = %e, "Cannot read kernel socket table");
            return None;
        }
    };

    let state = sockets.iter().find_map(|info| match &info.protocol_socket_info {
        ProtocolSocketInfo::Tcp(tcp)
            if tcp.local_port == local.port()
                && tcp.remote_port == remote.port()
                && tcp.remote_addr == remote.ip() =>
        {
            Some(ConnectionState::from(tcp.state))
        }
        _ => None,
    });

    debug!(%local, %remote, state = ?state, "Kernel socket table lookup");
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tcp_state() {
        assert_eq!(ConnectionState::from(TcpState::Established), ConnectionState::Established);
        assert_eq!(ConnectionState::from(TcpState::SynSent), ConnectionState::SynSent);
        assert_eq!(ConnectionState::from(TcpState::TimeWait), ConnectionState::TimeWait);
        assert_eq!(ConnectionState::from(TcpState::Closed), ConnectionState::Close);
    }

    #[test]
    fn test_display_uses_kernel_spelling() {
        assert_eq!(ConnectionState::Established.to_string(), "ESTABLISHED");
        assert_eq!(ConnectionState::SynSent.to_string(), "SYN_SENT");
        assert_eq!(ConnectionState::CloseWait.to_string(), "CLOSE_WAIT");
    }

    #[test]
    fn test_lookup_of_unused_pair_finds_nothing() {
        // Port 1 -> port 1 on a TEST-NET address is never a live socket
        let local: SocketAddr = "127.0.0.1:1".parse().unwrap();
        let remote: SocketAddr = "192.0.2.1:1".parse().unwrap();
        assert_eq!(lookup_state(local, remote), None);
    }
}
