// UI rendering module
//
// This module contains all UI rendering components.
// The main draw() function orchestrates rendering of all UI panels.

mod banner;
mod event_log;
mod state_panel;
mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use banner::render_banner;
use event_log::render_event_log;
use state_panel::render_state_panel;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: banner, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_banner(f, chunks[0], app);

    // Body: state panel + event log
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // State
            Constraint::Percentage(60), // Event log
        ])
        .split(chunks[1]);

    render_state_panel(f, body_chunks[0], app);
    render_event_log(f, body_chunks[1], app);

    render_status_bar(f, chunks[2], app);
}
