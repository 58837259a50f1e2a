use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::characters::{normalize_key, CharacterProvider, CharacterSet, RandomProvider};
use crate::clock::{Clock, SystemClock};

pub const DEFAULT_WINDOW_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// number of past and upcoming characters shown around the current one
    pub window_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionStatus {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keystroke {
    pub expected: char,
    pub typed: char,
    pub outcome: Outcome,
}

/// How a character in the display window should be presented
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Current,
    Pending,
}

impl From<Outcome> for CharStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => CharStatus::Correct,
            Outcome::Incorrect => CharStatus::Incorrect,
        }
    }
}

/// Point-in-time view of the session counters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionStats {
    pub correct: u64,
    pub incorrect: u64,
    pub total: u64,
    pub accuracy: f64,
    pub rate: f64,
    pub elapsed: Duration,
}

/// One practice run: Idle -> Running -> Finished, back to Idle on reset.
///
/// Transitions that are not valid from the current status are ignored.
#[derive(Debug)]
pub struct Session<P: CharacterProvider = RandomProvider, C: Clock = SystemClock> {
    config: SessionConfig,
    provider: P,
    clock: C,
    status: SessionStatus,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    started_wall: Option<DateTime<Local>>,
    correct_count: u64,
    incorrect_count: u64,
    current_char: Option<char>,
    history: VecDeque<Keystroke>,
    upcoming: VecDeque<char>,
}

impl Session {
    pub fn new(charset: CharacterSet, config: SessionConfig) -> Self {
        Session::with_parts(config, RandomProvider::new(charset), SystemClock)
    }

    pub fn with_seed(charset: CharacterSet, config: SessionConfig, seed: u64) -> Self {
        Session::with_parts(config, RandomProvider::with_seed(charset, seed), SystemClock)
    }
}

impl<P: CharacterProvider, C: Clock> Session<P, C> {
    pub fn with_parts(config: SessionConfig, provider: P, clock: C) -> Self {
        Self {
            config,
            provider,
            clock,
            status: SessionStatus::Idle,
            started_at: None,
            stopped_at: None,
            started_wall: None,
            correct_count: 0,
            incorrect_count: 0,
            current_char: None,
            history: VecDeque::with_capacity(config.window_size + 1),
            upcoming: VecDeque::with_capacity(config.window_size),
        }
    }

    /// Idle -> Running. Returns false if the session was not idle.
    pub fn start(&mut self) -> bool {
        if self.status != SessionStatus::Idle {
            debug!(status = %self.status, "ignoring start");
            return false;
        }

        self.started_at = Some(self.clock.now());
        self.started_wall = Some(Local::now());
        self.current_char = Some(self.provider.next_char());
        self.upcoming.clear();
        for _ in 0..self.config.window_size {
            self.upcoming.push_back(self.provider.next_char());
        }
        self.status = SessionStatus::Running;

        info!(charset = %self.provider.charset(), "session started");
        true
    }

    /// Score one keystroke against the current character and advance.
    ///
    /// Only has an effect while running; returns the recorded outcome.
    pub fn submit_key(&mut self, key: char) -> Option<Outcome> {
        if self.status != SessionStatus::Running {
            debug!(status = %self.status, "ignoring key");
            return None;
        }
        let expected = self.current_char?;

        let typed = normalize_key(key);
        let outcome = if typed == expected {
            self.correct_count += 1;
            Outcome::Correct
        } else {
            self.incorrect_count += 1;
            Outcome::Incorrect
        };

        self.history.push_back(Keystroke {
            expected,
            typed,
            outcome,
        });
        while self.history.len() > self.config.window_size {
            self.history.pop_front();
        }

        let next = self.provider.next_char();
        self.current_char = match self.upcoming.pop_front() {
            Some(queued) => {
                self.upcoming.push_back(next);
                Some(queued)
            }
            None => Some(next),
        };

        Some(outcome)
    }

    /// Running -> Finished. Returns false if the session was not running.
    pub fn stop(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            debug!(status = %self.status, "ignoring stop");
            return false;
        }

        self.stopped_at = Some(self.clock.now());
        self.status = SessionStatus::Finished;

        let stats = self.snapshot();
        info!(
            correct = stats.correct,
            incorrect = stats.incorrect,
            npm = stats.rate,
            elapsed_secs = stats.elapsed.as_secs_f64(),
            "session finished"
        );
        true
    }

    /// Back to Idle from any status, discarding counts and timestamps.
    pub fn reset(&mut self) {
        if self.status != SessionStatus::Idle {
            info!(status = %self.status, "session reset");
        }

        self.status = SessionStatus::Idle;
        self.started_at = None;
        self.stopped_at = None;
        self.started_wall = None;
        self.correct_count = 0;
        self.incorrect_count = 0;
        self.current_char = None;
        self.history.clear();
        self.upcoming.clear();
    }

    /// Time since start, frozen once the session is stopped
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(start) => {
                let end = self.stopped_at.unwrap_or_else(|| self.clock.now());
                end.saturating_duration_since(start)
            }
            None => Duration::ZERO,
        }
    }

    /// Correct keystrokes per minute (NPM); zero before any time has passed
    pub fn rate(&self) -> f64 {
        let minutes = self.elapsed().as_secs_f64() / 60.0;
        if minutes <= 0.0 {
            return 0.0;
        }
        self.correct_count as f64 / minutes
    }

    /// Percentage of keystrokes that were correct
    pub fn accuracy(&self) -> f64 {
        match self.total_count() {
            0 => 0.0,
            total => self.correct_count as f64 / total as f64 * 100.0,
        }
    }

    pub fn snapshot(&self) -> SessionStats {
        SessionStats {
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            total: self.total_count(),
            accuracy: self.accuracy(),
            rate: self.rate(),
            elapsed: self.elapsed(),
        }
    }

    /// Recent keystrokes, then the current character and the upcoming ones
    /// while running.
    pub fn window(&self) -> Vec<(char, CharStatus)> {
        let mut window: Vec<(char, CharStatus)> = self
            .history
            .iter()
            .map(|k| (k.expected, k.outcome.into()))
            .collect();

        if self.status == SessionStatus::Running {
            if let Some(current) = self.current_char {
                window.push((current, CharStatus::Current));
            }
            window.extend(self.upcoming.iter().map(|&c| (c, CharStatus::Pending)));
        }

        window
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn current_char(&self) -> Option<char> {
        self.current_char
    }

    pub fn correct_count(&self) -> u64 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u64 {
        self.incorrect_count
    }

    pub fn total_count(&self) -> u64 {
        self.correct_count + self.incorrect_count
    }

    pub fn history(&self) -> impl Iterator<Item = &Keystroke> {
        self.history.iter()
    }

    pub fn started_wall(&self) -> Option<DateTime<Local>> {
        self.started_wall
    }

    pub fn charset(&self) -> CharacterSet {
        self.provider.charset()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
