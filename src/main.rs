use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{stdin, stdout},
    process::ExitCode,
    thread,
};
use tmr::{
    app::{Action, App},
    app_dirs::AppDirs,
    cli::{self, Config},
    config::{ConfigStore, FileConfigStore, Preferences},
    logging,
    notify::{BellNotifier, Notifier, SilentNotifier},
    plain,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    timer::Timer,
};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match cli::parse(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("try 'tmr --help' for usage");
            return ExitCode::FAILURE;
        }
    };

    if config.show_help {
        print!("{}", cli::help_text());
        return ExitCode::SUCCESS;
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("warning: logging disabled, cannot open {}: {err}", path.display());
        }
    }

    if config.reset_mode {
        tracing::info!("reset requested, nothing to reset yet");
        println!("nothing to reset");
        return ExitCode::SUCCESS;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "countdown aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let prefs = FileConfigStore::new().load();
    let tick = FixedTicker::from_millis(prefs.tick_ms());
    let timer = Timer::new(config.duration_seconds);
    let mut notifier: Box<dyn Notifier> = if prefs.bell {
        Box::new(BellNotifier::new(stdout()))
    } else {
        Box::new(SilentNotifier)
    };

    if !stdout().is_tty() || !stdin().is_tty() {
        let mut timer = timer;
        return plain::run(
            &mut timer,
            &mut stdout(),
            notifier.as_mut(),
            tick.interval(),
            thread::sleep,
        );
    }

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let result = start_tui(&mut terminal, timer, prefs, notifier, tick);

    // put the terminal back even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    timer: Timer,
    prefs: Preferences,
    notifier: Box<dyn Notifier>,
    tick: FixedTicker,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(timer, prefs, notifier)?;
    let runner = Runner::new(CrosstermEventSource::new(), tick);
    drive(terminal, &mut app, &runner)
}

fn drive<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let size = terminal.size()?;
        match app.handle(runner.step(), (size.width, size.height))? {
            Action::Quit => return Ok(()),
            Action::Continue => {}
        }
    }
}
