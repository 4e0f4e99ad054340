//! ═══════════════════════════════════════════════════════════════════════════════
//! RUNNER — Terminal Setup and Event Loop
//! ═══════════════════════════════════════════════════════════════════════════════

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::display;
use crate::keys::intent_for;
use crate::state::App;

/// Redraw and input poll period, ~20 FPS
const FRAME: Duration = Duration::from_millis(50);

/// Raw mode plus alternate screen; restored on drop, including on error paths
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        undo_on_error(Self::open_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    fn open_screen() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

/// Run `undo` when a setup step after raw mode fails
fn undo_on_error<T>(result: anyhow::Result<T>, undo: impl FnOnce()) -> anyhow::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub struct DashboardRunner {
    app: App,
}

impl DashboardRunner {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Draw, poll input, apply intents until quit
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        tracing::info!(route = %self.app.route(), "dashboard started");

        while !self.app.should_quit {
            guard.terminal.draw(|f| display::draw(f, &self.app))?;

            // Blocking poll; ticker tasks keep running on the other workers
            let ready = tokio::task::block_in_place(|| event::poll(FRAME))?;
            if !ready {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if let Some(intent) = intent_for(key, self.app.route()) {
                    tracing::trace!(?intent, "intent");
                    self.app.apply(intent);
                }
            }
        }

        tracing::info!("dashboard closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: anyhow::Result<()> =
            undo_on_error(Err(anyhow::anyhow!("no screen")), || restored = true);
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let result = undo_on_error(Ok(5), || restored = true);
        assert_eq!(result.unwrap(), 5);
        assert!(!restored);
    }
}
