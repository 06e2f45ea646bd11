// Background run worker
//
// Owns one lifecycle run on its own OS thread so the blocking connect() never
// stalls the UI loop. Events go back over a single in-order channel and a
// completion message always follows, whatever way the run ends.

use super::Pace;
use crate::net::{ConnectionTarget, Event, Narrator};
use crossbeam_channel::Sender;
use std::io;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Name of the worker thread (shows up in panics and debuggers)
pub const WORKER_THREAD_NAME: &str = "narrator-run";

/// Messages from the worker to the display sink
#[derive(Debug, Clone, PartialEq)]
pub enum NarratorMessage {
    Event(Event),
    RunComplete,
}

/// Sends RunComplete when dropped, including during unwinding
struct CompletionGuard {
    tx: Sender<NarratorMessage>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // Receiver gone means the UI already quit
        let _ = self.tx.send(NarratorMessage::RunComplete);
    }
}

/// Run one lifecycle on a dedicated thread
pub fn spawn_run(
    narrator: Narrator,
    target: ConnectionTarget,
    pace: Pace,
    tx: Sender<NarratorMessage>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let guard = CompletionGuard { tx };
            info!(dest = %target, "Worker started");

            let mut run = narrator.run(target);
            for event in run.by_ref() {
                let delay = pace.after(event.phase);
                if guard.tx.send(NarratorMessage::Event(event)).is_err() {
                    debug!("Display sink disconnected, abandoning run");
                    break;
                }
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }

            info!(completed = run.is_finished(), "Worker finished");
        })
}
