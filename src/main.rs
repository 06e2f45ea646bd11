// tcpnarrate - TCP Handshake Visualizer
// Narrates socket(), connect() and close() as a connection walks its lifecycle

mod app;
mod net;
#[cfg(test)]
mod testing;
mod theme;
mod ui;

use anyhow::Result;
use app::{config::UI_POLL_INTERVAL, event::handle_key_event, AppConfig, AppState};
use net::{ConnectionTarget, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> Result<()> {
    let config = AppConfig {
        target: ConnectionTarget::new(DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT)?,
        ..AppConfig::default()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: AppConfig,
) -> Result<()> {
    let mut app = AppState::new(config);
    loop {
        app.on_tick();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(UI_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app, key.code);
                }
            }
        }
    }
}
