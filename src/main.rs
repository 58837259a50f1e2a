use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use numpad::{
    app::{App, KeyAction},
    app_dirs::AppDirs,
    characters::CharacterProvider,
    clock::Clock,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{self, AppEvent, EventSource, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
};
use tracing::{info, warn};

/// numeric keypad typing practice, one character at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice the numeric keypad one character at a time. Shows recent and upcoming characters, colour-codes every keystroke, and reports accuracy and numbers per minute (NPM)."
)]
pub struct Cli {
    /// number of past and upcoming characters shown around the current one
    #[clap(short = 'w', long)]
    window_size: Option<usize>,

    /// practice digits only, without the operator and decimal keys
    #[clap(short = 'd', long, conflicts_with = "numpad")]
    digits_only: bool,

    /// practice the full numpad set, overriding a saved --digits-only
    #[clap(long)]
    numpad: bool,

    /// milliseconds between statistics refreshes
    #[clap(short = 't', long)]
    tick_rate_ms: Option<u64>,

    /// seed for the character generator, for repeatable sessions
    #[clap(long, conflicts_with = "no_seed")]
    seed: Option<u64>,

    /// draw fresh random characters, ignoring a saved seed
    #[clap(long)]
    no_seed: bool,

    /// wait for Enter instead of starting immediately
    #[clap(long, conflicts_with = "auto_start")]
    no_auto_start: bool,

    /// start the session immediately, overriding a saved --no-auto-start
    #[clap(long)]
    auto_start: bool,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,

    /// config file to use instead of the platform default
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Layer command line flags over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if self.digits_only {
            config.digits_only = true;
        }
        if self.numpad {
            config.digits_only = false;
        }
        if let Some(tick_rate_ms) = self.tick_rate_ms {
            config.tick_rate_ms = tick_rate_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_seed {
            config.seed = None;
        }
        if self.no_auto_start {
            config.auto_start = false;
        }
        if self.auto_start {
            config.auto_start = true;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        // logging is best effort; the TUI owns the terminal
        let _ = logging::init_logging(&log_path);
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
    }

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut terminal = setup_terminal()?;

    let runner = Runner::with_tick_rate_ms(runtime::spawn_terminal_reader(), config.tick_rate_ms);
    let mut app = App::new(config);
    info!(config = ?app.config, "starting");
    let result = start_tui(&mut terminal, &mut app, &runner);
    if let Err(error) = &result {
        warn!(%error, "event loop failed");
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B, P, C, E>(
    terminal: &mut Terminal<B>,
    app: &mut App<P, C>,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    P: CharacterProvider,
    C: Clock,
    E: EventSource,
{
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.on_tick() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            // nothing can quit the loop without input
            AppEvent::Disconnected => {
                let closed = io::Error::new(io::ErrorKind::BrokenPipe, "terminal input closed");
                return Err(closed.into());
            }
            AppEvent::Key(key) => match app.on_key(key) {
                KeyAction::Quit => break,
                KeyAction::Redraw => {
                    terminal.draw(|f| ui(app, f))?;
                }
                KeyAction::Ignore => {}
            },
        }
    }

    Ok(())
}

/// Raw mode plus the alternate screen; raw mode is undone if anything after
/// enabling it fails
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

fn undo_on_error<T>(setup: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    let result = setup();
    if let Err(error) = &result {
        warn!(%error, "terminal setup failed");
        undo();
    }
    result
}

fn ui<P: CharacterProvider, C: Clock>(app: &App<P, C>, f: &mut Frame) {
    f.render_widget(app, f.area());
}
