// State panel rendering module
//
// Renders the current lifecycle label, the start trigger and a ladder of the
// five narrated phases showing which have been passed.
//
// Data extraction lives in build_state_view() so it can be tested without a
// terminal.

use crate::app::AppState;
use crate::net::{ConnectionState, LifecyclePhase};
use crate::theme::{
    kernel_state_color, phase_color, phase_icon, BLOOD_RED, BONE_WHITE, NEON_PURPLE,
    PUMPKIN_ORANGE, TOXIC_GREEN,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// How a phase is drawn on the ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RungStatus {
    /// Reached earlier in this run
    Passed,
    /// The latest phase of this run
    Current,
    /// Not reached (yet)
    Pending,
    /// The run failed before this phase could be reached
    Skipped,
}

/// View model for the state panel
#[derive(Debug, Clone, PartialEq)]
pub struct StateView {
    pub label: String,
    pub icon: &'static str,
    pub color: Color,
    pub trigger_enabled: bool,
    pub rungs: Vec<(LifecyclePhase, RungStatus)>,
    pub kernel_state: Option<ConnectionState>,
    pub error: Option<String>,
}

/// Build StateView from AppState
pub fn build_state_view(app: &AppState) -> StateView {
    let phase = app.phase.unwrap_or(LifecyclePhase::Closed);
    let failed = app.run_phases.last() == Some(&LifecyclePhase::Error);
    let reached = app
        .run_phases
        .iter()
        .filter(|p| **p != LifecyclePhase::Error)
        .count();

    let rungs = LifecyclePhase::SUCCESS_PATH
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let status = if idx + 1 < reached || (idx + 1 == reached && failed) {
                RungStatus::Passed
            } else if idx + 1 == reached {
                RungStatus::Current
            } else if failed {
                RungStatus::Skipped
            } else {
                RungStatus::Pending
            };
            (*p, status)
        })
        .collect();

    let error = app.last_error.clone();

    StateView {
        label: app.state_label.clone(),
        icon: phase_icon(phase),
        color: phase_color(phase),
        trigger_enabled: !app.is_run_active(),
        rungs,
        kernel_state: app.last_kernel_state,
        error,
    }
}

pub fn render_state_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let view = build_state_view(app);

    let block = Block::default()
        .title(Span::styled(
            "━ 🔎 Connection State ",
            Style::default().fg(NEON_PURPLE).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(NEON_PURPLE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // State label
            Constraint::Length(2), // Trigger
            Constraint::Min(0),    // Ladder
        ])
        .split(inner);

    let label = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("State: ", Style::default().fg(BONE_WHITE)),
            Span::styled(
                format!("{} {}", view.icon, view.label),
                Style::default().fg(view.color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[0]);

    let trigger = if view.trigger_enabled {
        Span::styled(
            "[ Enter: Start TCP Connection ]",
            Style::default().fg(TOXIC_GREEN).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "[ connection in progress… ]",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(
        Paragraph::new(Line::from(trigger)).alignment(Alignment::Center),
        chunks[1],
    );

    let mut lines: Vec<Line> = view
        .rungs
        .iter()
        .enumerate()
        .map(|(idx, (phase, status))| {
            let (marker, style) = match status {
                RungStatus::Passed => ("✔", Style::default().fg(TOXIC_GREEN)),
                RungStatus::Current => (
                    "▶",
                    Style::default()
                        .fg(phase_color(*phase))
                        .add_modifier(Modifier::BOLD),
                ),
                RungStatus::Pending => ("·", Style::default().fg(Color::DarkGray)),
                RungStatus::Skipped => ("✘", Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![
                Span::styled(format!("  {} ", marker), style),
                Span::styled(format!("{}. {}", idx + 1, phase.short_label()), style),
            ])
        })
        .collect();

    if let Some(state) = view.kernel_state {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  kernel: ", Style::default().fg(BONE_WHITE)),
            Span::styled(
                state.to_string(),
                Style::default().fg(kernel_state_color(state)),
            ),
        ]));
    }

    if let Some(error) = &view.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(BLOOD_RED),
        )));
    } else if view.rungs.iter().all(|(_, s)| *s == RungStatus::Pending) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No connection yet",
            Style::default().fg(PUMPKIN_ORANGE),
        )));
    }

    f.render_widget(Paragraph::new(lines), chunks[2]);
}
