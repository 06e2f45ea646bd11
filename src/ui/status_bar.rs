// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and the trigger
// indicator. Hints are dropped by priority when the terminal is narrow.

use crate::app::AppState;
use crate::theme::{BONE_WHITE, NEON_PURPLE, PUMPKIN_ORANGE, TOXIC_GREEN};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    // Calculate available width for hints (subtract borders and icon)
    let available_width = area.width.saturating_sub(4);

    struct Hint {
        priority: u8,
        key: &'static str,
        desc: &'static str,
        color: Color,
    }

    let hints = [
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
            color: Color::Red,
        },
        Hint {
            priority: 1,
            key: "Enter:",
            desc: "Connect | ",
            color: NEON_PURPLE,
        },
        Hint {
            priority: 2,
            key: "↑↓:",
            desc: "Scroll | ",
            color: NEON_PURPLE,
        },
        Hint {
            priority: 2,
            key: "End:",
            desc: "Follow | ",
            color: NEON_PURPLE,
        },
        Hint {
            priority: 3,
            key: "C:",
            desc: "Clear log | ",
            color: NEON_PURPLE,
        },
    ];

    let mut spans = vec![Span::styled(" 🔌 ", Style::default().fg(NEON_PURPLE))];
    let mut current_length = 4;

    for priority in 1..=3 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.len() + hint.desc.len();
            if current_length + hint_length <= available_width as usize {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    spans.push(Span::raw(" "));
    spans.extend(build_trigger_indicator(app));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(NEON_PURPLE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Trigger indicator: [READY] when a run can start, [BUSY] while one runs
pub fn build_trigger_indicator(app: &AppState) -> Vec<Span<'static>> {
    let (text, color) = if !app.is_run_active() {
        ("READY", TOXIC_GREEN)
    } else {
        ("BUSY", PUMPKIN_ORANGE)
    };

    vec![
        Span::styled("[", Style::default().fg(BONE_WHITE)),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("]", Style::default().fg(BONE_WHITE)),
    ]
}
