use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type CounterTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Keeps the terminal in raw mode on the alternate screen.
///
/// Restoration runs exactly once: on drop, or from the panic hook if the
/// UI panics first.
pub struct TerminalGuard {
    active: Arc<AtomicBool>,
}

impl TerminalGuard {
    fn install() -> Self {
        let active = Arc::new(AtomicBool::new(true));

        let hook_active = Arc::clone(&active);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if hook_active.swap(false, Ordering::SeqCst) {
                let _ = restore_terminal();
            }
            previous(info);
        }));

        Self { active }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            if let Err(err) = restore_terminal() {
                tracing::error!(error = %err, "Failed to restore terminal");
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Enter raw mode and the alternate screen. The returned guard undoes both.
pub fn setup_terminal() -> io::Result<(CounterTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard::install();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    Ok((terminal, guard))
}
