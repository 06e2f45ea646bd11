// OS socket implementation
//
// socket() and the I/O timeouts happen in create(), connect() is a bounded
// connect on that same descriptor, and close() shuts it down. The descriptor
// is freed whenever the handle is dropped.

use super::kernel;
use super::{ConnectionState, ConnectionTarget, NarratorError, SocketApi, SocketHandle};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{Shutdown, SocketAddr, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, warn};

/// Production socket factory (TCP over IPv4)
#[derive(Debug, Clone, Copy)]
pub struct TcpSocketApi {
    /// Look the connection up in the kernel socket table after connect
    pub observe_kernel: bool,
}

impl TcpSocketApi {
    pub fn new() -> Self {
        Self {
            observe_kernel: true,
        }
    }

    /// Resolve `target` and open an unconnected IPv4 stream socket for it
    pub fn open(&self, target: &ConnectionTarget) -> Result<TcpHandle, NarratorError> {
        let addr = resolve_ipv4(target)?;
        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
        socket.set_read_timeout(Some(target.timeout))?;
        socket.set_write_timeout(Some(target.timeout))?;
        debug!(dest = %target, %addr, "Socket created");

        Ok(TcpHandle {
            addr,
            timeout: target.timeout,
            socket: Some(socket),
            connected: false,
            observe_kernel: self.observe_kernel,
        })
    }
}

impl Default for TcpSocketApi {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketApi for TcpSocketApi {
    fn create(&self, target: &ConnectionTarget) -> Result<Box<dyn SocketHandle>, NarratorError> {
        Ok(Box::new(self.open(target)?))
    }
}

/// Resolve `target` to its first IPv4 address
pub fn resolve_ipv4(target: &ConnectionTarget) -> Result<SocketAddr, NarratorError> {
    let addrs = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|e| NarratorError::NameResolution {
            host: target.host.clone(),
            reason: e.to_string(),
        })?;

    addrs
        .into_iter()
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| NarratorError::NameResolution {
            host: target.host.clone(),
            reason: "no IPv4 address".to_string(),
        })
}

/// One TCP socket. Closed explicitly by `close` or implicitly on drop.
#[derive(Debug)]
pub struct TcpHandle {
    addr: SocketAddr,
    timeout: Duration,
    socket: Option<Socket>,
    connected: bool,
    observe_kernel: bool,
}

impl TcpHandle {
    /// Read timeout configured on the descriptor
    pub fn read_timeout(&self) -> io::Result<Option<Duration>> {
        self.socket()?.read_timeout()
    }

    /// Local address of the descriptor (unspecified until connected)
    pub fn local_addr(&self) -> io::Result<Option<SocketAddr>> {
        Ok(self.socket()?.local_addr()?.as_socket())
    }

    fn socket(&self) -> io::Result<&Socket> {
        self.socket
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "socket already closed"))
    }
}

impl SocketHandle for TcpHandle {
    fn connect(&mut self) -> Result<(), NarratorError> {
        let socket = self.socket()?;
        socket
            .connect_timeout(&SockAddr::from(self.addr), self.timeout)
            .map_err(|e| NarratorError::from_connect(e, self.addr, self.timeout))?;
        debug!(peer = %self.addr, local = ?self.local_addr().ok().flatten(), "Connected");
        self.connected = true;
        Ok(())
    }

    fn kernel_state(&self) -> Option<ConnectionState> {
        if !self.observe_kernel || !self.connected {
            return None;
        }
        let local = self.local_addr().ok()??;
        kernel::lookup_state(local, self.addr)
    }

    fn close(mut self: Box<Self>) -> Result<(), NarratorError> {
        let connected = std::mem::take(&mut self.connected);
        if let Some(socket) = self.socket.take() {
            if connected {
                match socket.shutdown(Shutdown::Both) {
                    Ok(()) => {}
                    // Peer already reset the connection; dropping still frees it
                    Err(e) if e.kind() == io::ErrorKind::NotConnected => {
                        debug!(peer = %self.addr, "Peer closed first");
                    }
                    Err(e) => return Err(NarratorError::Socket(e)),
                }
            }
        }
        Ok(())
    }
}

impl Drop for TcpHandle {
    fn drop(&mut self) {
        if let Some(socket) = self.socket.take() {
            if self.connected {
                if let Err(e) = socket.shutdown(Shutdown::Both) {
                    warn!(peer = %self.addr, error = %e, "Shutdown on drop failed");
                }
            }
        }
    }
}
