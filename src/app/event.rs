// Keyboard event handling
//
// Maps key presses onto AppState actions. The start trigger is the only key
// that reaches the network; everything else is view state.

use super::AppState;
use crossterm::event::KeyCode;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `Enter`, `s`, `S` - Start a TCP connection (ignored while one is running)
/// - `Up` / `Down` - Scroll the event log
/// - `End` - Follow the newest log line
/// - `c`, `C` - Clear the event log
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
            false
        }
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
            app.on_start_requested();
            true
        }
        KeyCode::Up => {
            app.select_previous_log();
            true
        }
        KeyCode::Down => {
            app.select_next_log();
            true
        }
        KeyCode::End => {
            app.selected_log = None;
            app.log_list_state.select(app.log.len().checked_sub(1));
            true
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.clear_log();
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppConfig, DisplaySink, Pace};
    use crate::net::{ConnectionTarget, Event, LifecyclePhase};
    use crate::testing::{FailAt, ScriptedSocketApi};
    use std::sync::Arc;
    use std::time::Duration;

    fn app() -> AppState {
        let config = AppConfig {
            target: ConnectionTarget::new("example.test", 80, Duration::from_secs(1)).unwrap(),
            pace: Pace::none(),
        };
        AppState::with_socket_api(config, Arc::new(ScriptedSocketApi::new(FailAt::Never)))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();

        assert!(app.running);
        assert!(!handle_key_event(&mut app, KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        assert!(!handle_key_event(&mut app, KeyCode::Char('Q')));
        assert!(!app.running);

        app.running = true;
        assert!(!handle_key_event(&mut app, KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_start_keys_fire_trigger_once() {
        let mut app = app();

        assert!(handle_key_event(&mut app, KeyCode::Enter));
        assert!(!app.trigger_enabled);
        assert_eq!(app.runs_started, 1);

        // Trigger is disabled until the run completes
        handle_key_event(&mut app, KeyCode::Char('s'));
        handle_key_event(&mut app, KeyCode::Char('S'));
        assert_eq!(app.runs_started, 1);
    }

    #[test]
    fn test_clear_key() {
        let mut app = app();
        app.on_event(Event::new(LifecyclePhase::Closed, "initial state"));
        assert!(!app.log.is_empty());

        handle_key_event(&mut app, KeyCode::Char('c'));
        assert!(app.log.is_empty());
    }

    #[test]
    fn test_scroll_and_follow() {
        let mut app = app();
        app.on_event(Event::new(LifecyclePhase::Closed, "initial state"));
        app.on_event(Event::new(LifecyclePhase::SocketCreated, "socket created"));

        handle_key_event(&mut app, KeyCode::Up);
        assert!(app.selected_log.is_some());

        handle_key_event(&mut app, KeyCode::End);
        assert_eq!(app.selected_log, None);
        assert_eq!(app.log_list_state.selected(), Some(app.log.len() - 1));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = app();
        assert!(handle_key_event(&mut app, KeyCode::Char('x')));
        assert!(handle_key_event(&mut app, KeyCode::Tab));
        assert!(app.running);
        assert!(app.trigger_enabled);
    }
}
