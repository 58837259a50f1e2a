use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::characters::{CharacterProvider, RandomProvider};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::session::{Session, SessionStatus};

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Redraw,
    Ignore,
    Quit,
}

/// Presentation state: the session plus the settings it was built from
#[derive(Debug)]
pub struct App<P: CharacterProvider = RandomProvider, C: Clock = SystemClock> {
    pub session: Session<P, C>,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        let charset = config.charset();
        let session = match config.seed {
            Some(seed) => Session::with_seed(charset, config.session_config(), seed),
            None => Session::new(charset, config.session_config()),
        };
        App::with_session(config, session)
    }
}

impl<P: CharacterProvider, C: Clock> App<P, C> {
    pub fn with_session(config: Config, session: Session<P, C>) -> Self {
        let mut app = Self { session, config };
        if app.config.auto_start {
            app.session.start();
        }
        app
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                KeyAction::Redraw
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.restart();
                KeyAction::Redraw
            }
            KeyCode::Char(c) if self.session.charset().is_valid_input(c) => {
                match self.session.submit_key(c) {
                    Some(_) => KeyAction::Redraw,
                    None => KeyAction::Ignore,
                }
            }
            other => {
                debug!(key = ?other, "unbound key");
                KeyAction::Ignore
            }
        }
    }

    /// Whether the screen needs refreshing on this tick
    pub fn on_tick(&mut self) -> bool {
        self.session.is_running()
    }

    /// Start when idle, stop when running, begin a fresh run when finished
    pub fn toggle(&mut self) {
        match self.session.status() {
            SessionStatus::Idle => {
                self.session.start();
            }
            SessionStatus::Running => {
                self.session.stop();
            }
            SessionStatus::Finished => {
                self.session.reset();
                self.session.start();
            }
        }
    }

    /// Discard the current run, starting a new one right away when auto start is on
    pub fn restart(&mut self) {
        self.session.reset();
        if self.config.auto_start {
            self.session.start();
        }
    }
}
