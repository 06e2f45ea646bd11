// Connection Narrator
//
// A run is a lazy iterator of Events. Every call to next() performs at most
// one blocking socket action, so the caller controls pacing and the order of
// events is the order of the underlying calls.

use super::{ConnectionState, ConnectionTarget, Event, LifecyclePhase, NarratorError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Socket factory used by the narrator
pub trait SocketApi: Send + Sync {
    /// Acquire a socket for `target` (resolution + socket() + timeout setup)
    fn create(&self, target: &ConnectionTarget) -> Result<Box<dyn SocketHandle>, NarratorError>;
}

/// One OS-level TCP endpoint, owned by exactly one run
///
/// Implementations must release the OS resource in `Drop` when `close` was
/// never called, so that every exit path of a run releases it.
pub trait SocketHandle: Send {
    /// Blocking connect to the target the handle was created for
    fn connect(&mut self) -> Result<(), NarratorError>;

    /// Kernel view of the connection, when it can be observed
    fn kernel_state(&self) -> Option<ConnectionState> {
        None
    }

    /// Close the socket, consuming the handle
    fn close(self: Box<Self>) -> Result<(), NarratorError>;
}

/// Starts lifecycle runs against a socket implementation
#[derive(Clone)]
pub struct Narrator {
    api: Arc<dyn SocketApi>,
}

impl Narrator {
    pub fn new(api: Arc<dyn SocketApi>) -> Self {
        Self { api }
    }

    /// Begin a fresh run. Nothing happens until the Lifecycle is iterated.
    pub fn run(&self, target: ConnectionTarget) -> Lifecycle {
        Lifecycle {
            api: Arc::clone(&self.api),
            target,
            handle: None,
            step: Step::Initial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Initial,
    Acquire,
    AnnounceConnect,
    Connect,
    Close,
    Done,
}

/// Event sequence of one run
///
/// Finite and fused. A Lifecycle cannot be restarted; ask the Narrator for a
/// new one instead.
pub struct Lifecycle {
    api: Arc<dyn SocketApi>,
    target: ConnectionTarget,
    handle: Option<Box<dyn SocketHandle>>,
    step: Step,
}

impl Lifecycle {
    pub fn is_finished(&self) -> bool {
        self.step == Step::Done
    }

    fn fail(&mut self, err: NarratorError) -> Event {
        warn!(dest = %self.target, kind = err.kind_name(), error = %err, "Run failed");
        self.step = Step::Done;
        // Releases the socket if one was acquired
        self.handle = None;
        Event::error(&err)
    }
}

impl Iterator for Lifecycle {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let event = match self.step {
            Step::Initial => {
                info!(dest = %self.target, "Starting lifecycle run");
                self.step = Step::Acquire;
                Event::new(LifecyclePhase::Closed, "initial state")
            }
            Step::Acquire => match self.api.create(&self.target) {
                Ok(handle) => {
                    self.handle = Some(handle);
                    self.step = Step::AnnounceConnect;
                    Event::new(LifecyclePhase::SocketCreated, "socket created")
                }
                Err(err) => self.fail(err),
            },
            Step::AnnounceConnect => {
                self.step = Step::Connect;
                Event::new(
                    LifecyclePhase::SynSent,
                    format!("connect in progress to {}", self.target),
                )
            }
            Step::Connect => {
                let result = match self.handle.as_mut() {
                    Some(handle) => handle.connect(),
                    None => Err(NarratorError::Socket(std::io::Error::new(
                        std::io::ErrorKind::NotConnected,
                        "socket handle missing",
                    ))),
                };
                match result {
                    Ok(()) => {
                        let kernel_state = self.handle.as_ref().and_then(|h| h.kernel_state());
                        self.step = Step::Close;
                        Event::new(LifecyclePhase::Established, "connection established")
                            .with_kernel_state(kernel_state)
                    }
                    Err(err) => self.fail(err),
                }
            }
            Step::Close => {
                let result = match self.handle.take() {
                    Some(handle) => handle.close(),
                    None => Ok(()),
                };
                match result {
                    Ok(()) => {
                        info!(dest = %self.target, "Lifecycle run completed");
                        self.step = Step::Done;
                        Event::new(LifecyclePhase::ClosedFinal, "connection terminated")
                    }
                    Err(err) => self.fail(err),
                }
            }
            Step::Done => return None,
        };

        debug!(phase = ?event.phase, message = %event.message, "Lifecycle event");
        Some(event)
    }
}

impl std::iter::FusedIterator for Lifecycle {}
