// Banner rendering module
//
// Renders the top banner with the ASCII logo, the fixed target and run count.

use crate::app::AppState;
use crate::theme::{BONE_WHITE, NEON_PURPLE, PUMPKIN_ORANGE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let target = app.target();
    let stats_text = format!(
        "   [🖥  {}] → [🌐 {}] [⏱ {}s] [runs: {}]",
        app.local_host,
        target,
        target.timeout.as_secs_f32(),
        app.runs_started
    );

    let banner_text = vec![
        Line::from(vec![Span::styled(
            "   _____  ____  ____  ",
            Style::default()
                .fg(Color::Rgb(138, 43, 226))
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled(
                "  |_   _|/ ___||  _ \\ ",
                Style::default().fg(Color::Rgb(148, 53, 236)),
            ),
            Span::styled(
                "   >>> TCP Handshake Visualizer v0.0.1 <<<",
                Style::default()
                    .fg(PUMPKIN_ORANGE)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "    | | | |    | |_) |",
                Style::default().fg(Color::Rgb(158, 63, 246)),
            ),
            Span::styled(
                "   \"Visualizing how socket() and connect() map to TCP states\"",
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![Span::styled(
            "    | | | |___ |  __/ ",
            Style::default().fg(Color::Rgb(168, 73, 255)),
        )]),
        Line::from(vec![
            Span::styled(
                "    |_|  \\____||_|    ",
                Style::default().fg(Color::Rgb(178, 83, 255)),
            ),
            Span::styled(stats_text, Style::default().fg(BONE_WHITE)),
        ]),
    ];

    let banner = Paragraph::new(banner_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(NEON_PURPLE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
