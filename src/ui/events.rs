use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// Terminal size changed; the next draw picks up the new area.
    Resize,
}

/// Polls crossterm on a dedicated thread and forwards events to the
/// async UI loop.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);

        let thread = thread::spawn(move || {
            let mut last_tick = Instant::now();
            while thread_running.load(Ordering::Relaxed) {
                // Short poll timeout so the running flag is checked often
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                tx.send(AppEvent::Key(key)).is_ok()
                            }
                            Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize).is_ok(),
                            Ok(_) => true,
                            Err(err) => {
                                tracing::error!(error = %err, "Failed to read terminal event");
                                false
                            }
                        };
                        if !forwarded {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        tracing::error!(error = %err, "Failed to poll terminal events");
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            rx,
            running,
            thread: Some(thread),
        }
    }

    /// Next event, or `None` once the polling thread has stopped.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
