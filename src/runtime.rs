//! Event plumbing between the terminal and the app.
//!
//! A reader thread turns crossterm events into [`AppEvent`]s on a channel;
//! the [`Runner`] waits on that channel for at most one tick interval, so
//! the statistics keep refreshing while no key is pressed.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

pub const DEFAULT_TICK_RATE_MS: u64 = 500;

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The input side went away; no further keys will arrive
    Disconnected,
}

/// Anything the runner can wait on for events
pub trait EventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

impl EventSource for Receiver<AppEvent> {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        Receiver::recv_timeout(self, timeout)
    }
}

/// Map a terminal event onto the events the app handles.
///
/// Only key presses pass; terminals with enhanced keyboard reporting also
/// send releases and repeats, which would score one keystroke twice.
pub fn translate(event: CtEvent) -> Option<AppEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

/// Spawn the crossterm reader thread.
///
/// The thread ends when reading fails or the receiver is dropped. Either
/// way the channel closes and the runner yields [`AppEvent::Disconnected`].
pub fn spawn_terminal_reader() -> Receiver<AppEvent> {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                let Some(ev) = translate(ev) else { continue };
                if tx.send(ev).is_err() {
                    debug!("event receiver dropped");
                    break;
                }
            }
            Err(error) => {
                warn!(%error, "terminal event reader stopped");
                break;
            }
        }
    });

    rx
}

/// Advances the app one event at a time, ticking when input is quiet
pub struct Runner<E: EventSource> {
    source: E,
    tick_rate: Duration,
}

impl<E: EventSource> Runner<E> {
    /// A zero tick rate is raised to one millisecond.
    pub fn new(source: E, tick_rate: Duration) -> Self {
        Self {
            source,
            tick_rate: tick_rate.max(Duration::from_millis(1)),
        }
    }

    pub fn with_tick_rate_ms(source: E, ms: u64) -> Self {
        Self::new(source, Duration::from_millis(ms))
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn step(&self) -> AppEvent {
        match self.source.recv_timeout(self.tick_rate) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Disconnected,
        }
    }
}
