pub mod app;
pub mod tabs;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

pub async fn run_tui(app: App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the application
    let res = run_app(&mut terminal, app, refresh_interval).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    refresh_interval: Duration,
) -> Result<()> {
    // Initial load before the first frame
    app.refresh().await?;
    let mut last_refresh = std::time::Instant::now();

    loop {
        // Settled request tasks report back through the event channel;
        // apply them before drawing so every state transition is rendered.
        app.drain_events();
        app.expire_alert();
        terminal.draw(|f| app.render(f))?;

        // Check for events with timeout
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // The check tab owns most printable keys for line editing.
                if app.current_tab == 2 {
                    match key.code {
                        KeyCode::Char(c) => {
                            if !app.check_in_flight {
                                app.input_buffer.push(c);
                            }
                            continue;
                        }
                        KeyCode::Backspace => {
                            if !app.check_in_flight {
                                app.input_buffer.pop();
                            }
                            continue;
                        }
                        KeyCode::Enter => {
                            app.submit_input();
                            continue;
                        }
                        KeyCode::Esc => {
                            if !app.check_in_flight {
                                app.input_buffer.clear();
                            }
                            continue;
                        }
                        _ => {}
                    }
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab => app.next_tab(),
                    KeyCode::BackTab => app.previous_tab(),
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        app.refresh().await?;
                        last_refresh = std::time::Instant::now();
                    }
                    KeyCode::Up => app.select_previous_rule(),
                    KeyCode::Down => app.select_next_rule().await,
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        if app.current_tab == 1 {
                            app.toggle_selected().await;
                        }
                    }
                    _ => {}
                }
            }
        } else if last_refresh.elapsed() >= refresh_interval {
            // Auto-refresh on timeout
            app.refresh().await?;
            last_refresh = std::time::Instant::now();
        }
    }
}
