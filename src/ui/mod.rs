//! Interactive terminal host.
//!
//! Renders the latest [`CounterView`](crate::counter::CounterView) and turns
//! key presses into submissions on a [`DriverHandle`].

pub mod app;
pub mod events;
pub mod footer;
pub mod layout;
pub mod render;
pub mod terminal_guard;
pub mod theme;

use crate::config::Config;
use crate::driver::{DriverError, DriverHandle};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;

pub async fn run(config: &Config, handle: &DriverHandle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(config, handle.view());
    let mut events = EventHandler::new(config.ui.tick_rate());
    let mut views = handle.subscribe();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => {
                    if let Some(action) = app.on_key(key) {
                        match handle.submit(action) {
                            Ok(()) => {}
                            Err(DriverError::Busy) => {
                                tracing::debug!(action = %action, "Ignored submit while busy");
                            }
                            Err(err) => {
                                tracing::error!(error = %err, "Counter driver unavailable");
                                break;
                            }
                        }
                    }
                }
                Some(AppEvent::Tick) => app.on_tick(),
                Some(AppEvent::Resize) => {}
                None => break,
            },
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                app.on_view(view);
            }
        }
    }

    drop(events);
    drop(guard);
    Ok(())
}
