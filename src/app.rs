//! Interactive frontend: reads actions, drives the session clock, prints
//!
//! Input arrives on a channel fed by a stdin thread. The main loop waits a
//! short while for a line, advances the session by the real time elapsed
//! since the previous iteration, then prints whatever the session published.

use crate::error::{AppError, Result};
use crate::render;
use crate::repl::{self, Action, View, HELP};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use lumen_core::{
    Command, LumenError, Notification, Session, StatusLine, SyntectTokenizer, Tokenizer,
};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// How long the loop waits for input before advancing the clock
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Whether the main loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Output settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print notifications and snapshots as JSON lines
    pub json: bool,

    /// Emit ANSI colors in the viewer
    pub color: bool,
}

pub struct App {
    session: Session,
    tokenizer: Box<dyn Tokenizer>,
    options: Options,
}

impl App {
    pub fn new(session: Session, options: Options) -> Self {
        Self {
            session,
            tokenizer: Box::new(SyntectTokenizer::new()),
            options,
        }
    }

    /// Swap the viewer tokenizer
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn greet(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "Lumen {} - {} ({} open tabs). Type 'help' for commands.",
            lumen_core::version(),
            self.session.tree().root().name,
            self.session.tabs().len()
        )?;
        self.show(View::Status, out)
    }

    /// Apply one input line
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let action = match repl::parse_line(line) {
            Ok(Some(action)) => action,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "! {}", err)?;
                return Ok(Flow::Continue);
            }
        };

        match action {
            Action::Send(command) => self.send(command, out)?,
            Action::ToggleDirty(id) => match self.session.tabs().get(id).map(|t| t.is_dirty) {
                Some(dirty) => self.send(Command::mark_dirty(id, !dirty), out)?,
                None => writeln!(out, "! no tab {}", id)?,
            },
            Action::Show(view) => self.show(view, out)?,
            Action::Help => writeln!(out, "{}", HELP)?,
            Action::Quit => {
                self.quit();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn send(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match self.session.send(command) {
            Ok(()) => Ok(()),
            // Published as InputRejected already
            Err(LumenError::EmptyInput { .. }) | Err(LumenError::NotFound(_)) => Ok(()),
            Err(LumenError::SessionClosed) => {
                writeln!(out, "! session is closed")?;
                Ok(())
            }
            Err(err) => Err(AppError::Core(err)),
        }
    }

    fn show(&self, view: View, out: &mut impl Write) -> Result<()> {
        let snapshot = self.session.snapshot();
        let text = match view {
            View::Tree => render::render_tree(&snapshot.tree),
            View::Tabs => render::render_tabs(&snapshot.tabs),
            View::Viewer => render::render_viewer(
                &self.session.viewer(),
                self.tokenizer.as_ref(),
                self.options.color,
            ),
            View::Chat => render::render_chat(&snapshot.conversation),
            View::Console => render::render_console(&snapshot.console),
            View::Status => {
                render::render_status(&StatusLine::new(&snapshot, &self.session.viewer()))
            }
            View::Snapshot => serde_json::to_string_pretty(&snapshot)?,
        };
        if !text.is_empty() {
            writeln!(out, "{}", text)?;
        }
        Ok(())
    }

    /// Advance the session by real elapsed time
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.session.advance(elapsed)
    }

    /// Print everything the session published since the last call
    pub fn flush_notifications(&mut self, out: &mut impl Write) -> Result<()> {
        while let Some(notification) = self.session.poll_notification() {
            self.print_notification(&notification, out)?;
        }
        Ok(())
    }

    fn print_notification(&self, notification: &Notification, out: &mut impl Write) -> Result<()> {
        if self.options.json {
            writeln!(out, "{}", serde_json::to_string(notification)?)?;
        } else if let Some(text) = render::render_notification(notification) {
            writeln!(out, "{}", text)?;
        }
        Ok(())
    }

    /// Shut the session down; pending follow-ups are dropped
    pub fn quit(&mut self) {
        if !self.session.is_closed() {
            self.session.shutdown();
        }
    }
}

/// Spawn the stdin reader
fn spawn_input() -> Result<Receiver<String>> {
    let (tx, rx) = bounded(64);
    std::thread::Builder::new()
        .name("lumen-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|e| AppError::InputThread(e.to_string()))?;
    Ok(rx)
}

/// Run the interactive loop until `quit` or end of input
///
/// At end of input the loop keeps ticking until every pending follow-up
/// has been delivered.
pub fn run(mut app: App) -> Result<()> {
    let input = spawn_input()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    app.greet(&mut out)?;
    out.flush()?;

    let mut last = Instant::now();
    loop {
        let flow = match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => app.handle_line(&line, &mut out)?,
            Err(RecvTimeoutError::Timeout) => Flow::Continue,
            Err(RecvTimeoutError::Disconnected) => {
                if app.session().pending_follow_ups() == 0 {
                    app.quit();
                    Flow::Quit
                } else {
                    std::thread::sleep(POLL_INTERVAL);
                    Flow::Continue
                }
            }
        };

        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;

        app.flush_notifications(&mut out)?;
        out.flush()?;

        if flow == Flow::Quit {
            break;
        }
    }

    tracing::info!("frontend exited");
    Ok(())
}
