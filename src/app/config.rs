// Application configuration
//
// Everything is compiled in: the target, the pacing of the narration and the
// UI loop timings. There are no flags, environment variables or files.

use crate::net::{ConnectionTarget, LifecyclePhase};
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// How long the UI loop waits for a key before redrawing
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Event log lines kept before the oldest are dropped
pub const MAX_LOG_LINES: usize = 500;

/// Pause after CLOSED and SOCKET CREATED so each phase stays visible
pub const STEP_DELAY: Duration = Duration::from_millis(700);

/// Pause while ESTABLISHED before close() is called
pub const ESTABLISHED_HOLD: Duration = Duration::from_millis(1500);

// ============================================================================
// Configuration Structs
// ============================================================================

/// Delays inserted between narrated events
///
/// Purely cosmetic: without them a loopback run finishes faster than a
/// single frame and the phases cannot be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub step_delay: Duration,
    pub established_hold: Duration,
}

impl Pace {
    /// No delays at all
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            step_delay: Duration::ZERO,
            established_hold: Duration::ZERO,
        }
    }

    /// Delay to apply after an event of `phase` has been delivered
    pub fn after(&self, phase: LifecyclePhase) -> Duration {
        match phase {
            LifecyclePhase::Closed | LifecyclePhase::SocketCreated => self.step_delay,
            LifecyclePhase::Established => self.established_hold,
            _ => Duration::ZERO,
        }
    }
}

impl Default for Pace {
    fn default() -> Self {
        Self {
            step_delay: STEP_DELAY,
            established_hold: ESTABLISHED_HOLD,
        }
    }
}

/// Process-wide configuration, fixed at startup
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub target: ConnectionTarget,
    pub pace: Pace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pace_matches_narration_rhythm() {
        let pace = Pace::default();
        assert_eq!(pace.after(LifecyclePhase::Closed), Duration::from_millis(700));
        assert_eq!(pace.after(LifecyclePhase::SocketCreated), Duration::from_millis(700));
        // connect() is the wait after SYN-SENT, no extra delay
        assert_eq!(pace.after(LifecyclePhase::SynSent), Duration::ZERO);
        assert_eq!(pace.after(LifecyclePhase::Established), Duration::from_millis(1500));
        assert_eq!(pace.after(LifecyclePhase::ClosedFinal), Duration::ZERO);
        assert_eq!(pace.after(LifecyclePhase::Error), Duration::ZERO);
    }

    #[test]
    fn test_no_pace() {
        let pace = Pace::none();
        for phase in LifecyclePhase::SUCCESS_PATH {
            assert_eq!(pace.after(phase), Duration::ZERO);
        }
    }

    #[test]
    fn test_default_config_targets_google_http() {
        let config = AppConfig::default();
        assert_eq!(config.target.to_string(), "google.com:80");
        assert_eq!(config.pace, Pace::default());
    }
}
