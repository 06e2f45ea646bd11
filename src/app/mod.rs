// Application state management
//
// AppState is the display sink: it owns everything the UI shows and is only
// ever mutated on the UI loop. Narrator output arrives as NarratorMessages on
// a channel and is applied in order by on_tick().

pub mod config;
pub mod event;
pub mod worker;

pub use config::{AppConfig, Pace};
pub use worker::NarratorMessage;

use crate::net::{ConnectionState, ConnectionTarget, Event, LifecyclePhase, Narrator, SocketApi};
use chrono::{DateTime, Local};
use config::MAX_LOG_LINES;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::Instant;

/// Receiving side of the narrator: what the UI must be able to do
pub trait DisplaySink {
    fn on_event(&mut self, event: Event);
    fn on_run_complete(&mut self);
}

/// Kind of log line, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// User action or note from the sink itself
    Info,
    /// Socket API call about to be made
    Call,
    /// State label change
    State,
    /// Observed kernel state
    Kernel,
    /// Failure description
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub kind: LogKind,
    pub text: String,
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Fixed connection target and pacing
    pub config: AppConfig,

    /// Phase of the latest event (None before the first run)
    pub phase: Option<LifecyclePhase>,

    /// Phases reached in the current or last run, in order
    pub run_phases: Vec<LifecyclePhase>,

    /// Label shown in the state panel
    pub state_label: String,

    /// Kernel TCP state observed during the current or last run
    pub last_kernel_state: Option<ConnectionState>,

    /// Failure message of the current or last run
    pub last_error: Option<String>,

    /// Whether the start trigger is enabled (false while a run is active)
    pub trigger_enabled: bool,

    /// Number of runs started since launch
    pub runs_started: u64,

    /// Event log, oldest first
    pub log: Vec<LogLine>,

    /// Currently selected log line (None = follow newest)
    pub selected_log: Option<usize>,

    /// List state for the event log (enables scrolling)
    pub log_list_state: ListState,

    /// When the current run was started
    pub run_started_at: Option<Instant>,

    /// Name of the machine the connection is made from
    pub local_host: String,

    narrator: Narrator,
    tx: Sender<NarratorMessage>,
    rx: Receiver<NarratorMessage>,
}

impl AppState {
    /// Create a new AppState using the real TCP socket layer
    pub fn new(config: AppConfig) -> Self {
        Self::with_socket_api(config, Arc::new(crate::net::TcpSocketApi::new()))
    }

    pub fn with_socket_api(config: AppConfig, api: Arc<dyn SocketApi>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            running: true,
            config,
            phase: None,
            run_phases: Vec::new(),
            state_label: LifecyclePhase::Closed.label().to_string(),
            last_kernel_state: None,
            last_error: None,
            trigger_enabled: true,
            runs_started: 0,
            log: Vec::new(),
            selected_log: None,
            log_list_state: ListState::default(),
            run_started_at: None,
            local_host: sysinfo::System::host_name().unwrap_or_else(|| "localhost".to_string()),
            narrator: Narrator::new(api),
            tx,
            rx,
        }
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.config.target
    }

    /// Whether a run is in progress
    pub fn is_run_active(&self) -> bool {
        !self.trigger_enabled
    }

    /// Start trigger. Ignored while a run is active.
    pub fn on_start_requested(&mut self) {
        if self.is_run_active() {
            tracing::debug!("Start requested while a run is active, ignoring");
            return;
        }

        self.trigger_enabled = false;
        self.runs_started += 1;
        self.run_phases.clear();
        self.last_kernel_state = None;
        self.last_error = None;
        self.run_started_at = Some(Instant::now());
        self.push_log(LogKind::Info, "User requested TCP connection");
        tracing::info!(run = self.runs_started, dest = %self.config.target, "Run requested");

        let spawned = worker::spawn_run(
            self.narrator.clone(),
            self.config.target.clone(),
            self.config.pace,
            self.tx.clone(),
        );
        if let Err(e) = spawned {
            tracing::warn!(error = %e, "Cannot spawn worker thread");
            self.on_event(Event::new(
                LifecyclePhase::Error,
                format!("GenericSocketError: cannot start worker: {}", e),
            ));
            self.on_run_complete();
        }
    }

    /// Drain pending narrator messages (called every loop iteration)
    pub fn on_tick(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(NarratorMessage::Event(event)) => self.on_event(event),
                Ok(NarratorMessage::RunComplete) => self.on_run_complete(),
                Err(TryRecvError::Empty) => break,
                // AppState holds a sender, so this only happens during teardown
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Clear the event log
    pub fn clear_log(&mut self) {
        self.log.clear();
        self.selected_log = None;
        self.log_list_state.select(None);
    }

    fn push_log(&mut self, kind: LogKind, text: impl Into<String>) {
        self.push_log_at(Local::now(), kind, text);
    }

    fn push_log_at(&mut self, timestamp: DateTime<Local>, kind: LogKind, text: impl Into<String>) {
        self.log.push(LogLine {
            timestamp,
            kind,
            text: text.into(),
        });

        if self.log.len() > MAX_LOG_LINES {
            let overflow = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..overflow);
            if let Some(idx) = self.selected_log {
                let idx = idx.saturating_sub(overflow);
                self.selected_log = Some(idx);
                self.log_list_state.select(Some(idx));
            }
        }

        // Follow the newest line unless the user scrolled away
        if self.selected_log.is_none() {
            self.log_list_state.select(Some(self.log.len() - 1));
        }
    }

    /// Move log selection up (decrease index)
    pub fn select_previous_log(&mut self) {
        if self.log.is_empty() {
            self.selected_log = None;
            self.log_list_state.select(None);
            return;
        }

        let idx = match self.selected_log {
            // Start just above the newest line
            None => self.log.len().saturating_sub(2),
            Some(idx) => idx.saturating_sub(1),
        };
        self.selected_log = Some(idx);
        self.log_list_state.select(Some(idx));
    }

    /// Move log selection down (increase index); past the end resumes following
    pub fn select_next_log(&mut self) {
        match self.selected_log {
            Some(idx) if idx + 1 < self.log.len() => {
                self.selected_log = Some(idx + 1);
                self.log_list_state.select(Some(idx + 1));
            }
            _ => {
                self.selected_log = None;
                self.log_list_state
                    .select(self.log.len().checked_sub(1));
            }
        }
    }
}

impl DisplaySink for AppState {
    fn on_event(&mut self, event: Event) {
        let label = event.phase.label();
        tracing::debug!(phase = ?event.phase, "Applying event");

        if let Some(prev) = self.run_phases.last() {
            if !prev.can_transition_to(event.phase) {
                tracing::warn!(from = ?prev, to = ?event.phase, "Out-of-order lifecycle event");
            }
        }

        if let Some(call) = event.phase.socket_call(&self.config.target) {
            self.push_log_at(event.timestamp, LogKind::Call, format!("Calling {}", call));
        }

        self.state_label = label.to_string();
        self.phase = Some(event.phase);
        self.run_phases.push(event.phase);
        self.push_log_at(event.timestamp, LogKind::State, format!("[STATE] {}", label));

        if event.is_error() {
            self.last_error = Some(event.message.clone());
            self.push_log_at(
                event.timestamp,
                LogKind::Error,
                format!("Error occurred: {}", event.message),
            );
        } else {
            self.push_log_at(event.timestamp, LogKind::Info, event.message.clone());
        }

        if let Some(kernel_state) = event.kernel_state {
            self.last_kernel_state = Some(kernel_state);
            self.push_log_at(
                event.timestamp,
                LogKind::Kernel,
                format!("Kernel socket table reports {}", kernel_state),
            );
        }
    }

    fn on_run_complete(&mut self) {
        self.trigger_enabled = true;
        if let Some(started) = self.run_started_at {
            tracing::info!(
                run = self.runs_started,
                elapsed = ?started.elapsed(),
                final_phase = ?self.phase,
                "Run complete"
            );
        }
    }
}
