// Event log rendering module
//
// Renders the scrollable log of socket calls, state changes and errors.
// Lines wider than the panel are cut at a display-width boundary so emoji
// and CJK text never split a cell.

use crate::app::AppState;
use crate::theme::{log_kind_color, DEEP_INDIGO, PUMPKIN_ORANGE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the "HH:MM:SS.mmm " prefix
const TIMESTAMP_WIDTH: usize = 13;

/// Cut `text` to at most `max_width` display cells, marking the cut with '…'
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        // Leave one cell for the ellipsis
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_event_log(f: &mut Frame, area: Rect, app: &mut AppState) {
    // Borders + highlight symbol
    let text_width = (area.width as usize)
        .saturating_sub(2)
        .saturating_sub(TIMESTAMP_WIDTH);

    let items: Vec<ListItem> = app
        .log
        .iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", line.timestamp.format("%H:%M:%S%.3f")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_to_width(&line.text, text_width),
                    Style::default().fg(log_kind_color(line.kind)),
                ),
            ]))
        })
        .collect();

    let title = format!("━ 📜 Event Log ({}) ", app.log.len());

    let log = List::new(items)
        .block(
            Block::default()
                .title(vec![
                    Span::styled(
                        title,
                        Style::default()
                            .fg(PUMPKIN_ORANGE)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("━━━━━━━", Style::default().fg(PUMPKIN_ORANGE)),
                ])
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(PUMPKIN_ORANGE)),
        )
        .highlight_style(if app.selected_log.is_some() {
            Style::default().bg(DEEP_INDIGO)
        } else {
            Style::default()
        });

    f.render_stateful_widget(log, area, &mut app.log_list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_to_width("Calling close()", 40), "Calling close()");
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let out = truncate_to_width("connect in progress to google.com:80", 10);
        assert_eq!(out, "connect i…");
        assert_eq!(out.width(), 10);
    }

    #[test]
    fn test_wide_chars_not_split() {
        // Each emoji is two cells wide
        let out = truncate_to_width("🟢🟢🟢🟢", 6);
        assert_eq!(out, "🟢🟢…");
        assert!(out.width() <= 6);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
