use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Everything the driving loop reacts to
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Production event source: a reader thread forwarding crossterm events
pub struct CrosstermEventSource {
    rx: Receiver<TimerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // key releases show up on some platforms, only presses count
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    TimerEvent::Key(key)
                }
                Ok(CtEvent::Resize(_, _)) => TimerEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for tests and headless runs
pub struct TestEventSource {
    rx: Receiver<TimerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the driving loop one event or tick at a time.
///
/// The tick only sets the redraw cadence; the timer itself reads the clock,
/// so a late or skipped tick costs nothing but a stale frame.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to one tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> TimerEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                TimerEvent::Tick
            }
        }
    }
}
