// Default theme functions
//
// Colors and icons for lifecycle phases and log lines.

use ratatui::style::Color;

use super::{BLOOD_RED, BONE_WHITE, NEON_PURPLE, PUMPKIN_ORANGE, TOXIC_GREEN};
use crate::app::LogKind;
use crate::net::{ConnectionState, LifecyclePhase};

/// Color for a lifecycle phase label
pub fn phase_color(phase: LifecyclePhase) -> Color {
    match phase {
        LifecyclePhase::Closed | LifecyclePhase::ClosedFinal => BONE_WHITE,
        LifecyclePhase::SocketCreated => NEON_PURPLE,
        LifecyclePhase::SynSent => PUMPKIN_ORANGE,
        LifecyclePhase::Established => TOXIC_GREEN,
        LifecyclePhase::Error => BLOOD_RED,
    }
}

/// Status icon for a phase
pub fn phase_icon(phase: LifecyclePhase) -> &'static str {
    match phase {
        LifecyclePhase::Closed => "⚪",
        LifecyclePhase::SocketCreated => "🔌",
        LifecyclePhase::SynSent => "⏳",
        LifecyclePhase::Established => "🟢",
        LifecyclePhase::ClosedFinal => "🏁",
        LifecyclePhase::Error => "🔴",
    }
}

/// Color for an event log line
pub fn log_kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Info => BONE_WHITE,
        LogKind::Call => PUMPKIN_ORANGE,
        LogKind::State => NEON_PURPLE,
        LogKind::Kernel => Color::Cyan,
        LogKind::Error => BLOOD_RED,
    }
}

/// Color for a kernel-reported TCP state
pub fn kernel_state_color(state: ConnectionState) -> Color {
    match state {
        ConnectionState::Established => TOXIC_GREEN,
        ConnectionState::SynSent | ConnectionState::SynRecv => PUMPKIN_ORANGE,
        ConnectionState::Close => BLOOD_RED,
        ConnectionState::Unknown => Color::Gray,
        _ => BONE_WHITE,
    }
}
