// Shared test support: tracing setup and a scripted socket implementation

use crate::net::{ConnectionState, ConnectionTarget, NarratorError, SocketApi, SocketHandle};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Route tracing output to the test harness (RUST_LOG controls verbosity)
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Where a scripted run should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Never,
    Resolve,
    Connect(io::ErrorKind),
    Close,
}

#[derive(Debug, Default)]
struct Counters {
    acquired: AtomicUsize,
    released: AtomicUsize,
    connects: AtomicUsize,
    closed: AtomicUsize,
}

/// Socket implementation that follows a script and counts resource use
#[derive(Debug, Clone)]
pub struct ScriptedSocketApi {
    fail: FailAt,
    kernel_state: Option<ConnectionState>,
    counters: Arc<Counters>,
}

impl ScriptedSocketApi {
    pub fn new(fail: FailAt) -> Self {
        Self {
            fail,
            kernel_state: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn with_kernel_state(mut self, state: ConnectionState) -> Self {
        self.kernel_state = Some(state);
        self
    }

    pub fn acquired(&self) -> usize {
        self.counters.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.counters.connects.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub fn open(&self) -> usize {
        self.acquired() - self.released()
    }
}

impl SocketApi for ScriptedSocketApi {
    fn create(&self, target: &ConnectionTarget) -> Result<Box<dyn SocketHandle>, NarratorError> {
        if self.fail == FailAt::Resolve {
            return Err(NarratorError::NameResolution {
                host: target.host.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        assert_eq!(self.open(), 0, "a second socket was acquired while one is open");
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedHandle {
            target: target.clone(),
            fail: self.fail,
            kernel_state: self.kernel_state,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct ScriptedHandle {
    target: ConnectionTarget,
    fail: FailAt,
    kernel_state: Option<ConnectionState>,
    counters: Arc<Counters>,
}

impl SocketHandle for ScriptedHandle {
    fn connect(&mut self) -> Result<(), NarratorError> {
        self.counters.connects.fetch_add(1, Ordering::SeqCst);
        match self.fail {
            FailAt::Connect(kind) => Err(NarratorError::from_connect(
                io::Error::new(kind, "scripted failure"),
                &self.target,
                self.target.timeout,
            )),
            _ => Ok(()),
        }
    }

    fn kernel_state(&self) -> Option<ConnectionState> {
        self.kernel_state
    }

    fn close(self: Box<Self>) -> Result<(), NarratorError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        match self.fail {
            FailAt::Close => Err(NarratorError::Socket(io::Error::new(
                io::ErrorKind::Other,
                "scripted close failure",
            ))),
            _ => Ok(()),
        }
    }
}

impl Drop for ScriptedHandle {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
