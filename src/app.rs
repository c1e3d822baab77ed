use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    celebration::Celebration,
    config::Preferences,
    error::TimerError,
    notify::{FinishWatcher, Notifier},
    runtime::TimerEvent,
    timer::{Clock, MonotonicClock, Timer, TimerSnapshot},
};

/// What the driving loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Everything one countdown run needs: the engine, the finish edge, and what
/// happens on it.
pub struct App<C: Clock = MonotonicClock> {
    pub timer: Timer<C>,
    pub celebration: Celebration,
    pub prefs: Preferences,
    watcher: FinishWatcher,
    notifier: Box<dyn Notifier>,
    last_snapshot: TimerSnapshot,
}

impl<C: Clock> App<C> {
    /// Build the app and start counting straight away.
    pub fn new(
        mut timer: Timer<C>,
        prefs: Preferences,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, TimerError> {
        let mut watcher = FinishWatcher::new();
        timer.start()?;
        let last_snapshot = timer.snapshot();
        watcher.observe(&last_snapshot);
        tracing::info!(total_seconds = timer.total_seconds(), "countdown started");

        Ok(Self {
            timer,
            celebration: Celebration::new(),
            prefs,
            watcher,
            notifier,
            last_snapshot,
        })
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.last_snapshot
    }

    /// React to one runtime event. `size` is the drawable area, used to
    /// place the expiry effect.
    pub fn handle(&mut self, event: TimerEvent, size: (u16, u16)) -> Result<Action, TimerError> {
        match event {
            TimerEvent::Tick => {
                self.on_tick(size);
                Ok(Action::Continue)
            }
            TimerEvent::Resize => Ok(Action::Continue),
            TimerEvent::Key(key) => self.on_key(key),
        }
    }

    pub fn on_tick(&mut self, (width, height): (u16, u16)) {
        let snapshot = self.timer.update();
        self.last_snapshot = snapshot;
        let now = self.timer.clock().now();

        if self.watcher.observe(&snapshot) {
            tracing::info!(total_seconds = snapshot.total_seconds, "countdown finished");
            if let Err(err) = self.notifier.notify(&snapshot) {
                tracing::warn!(%err, "could not deliver finish notification");
            }
            if self.prefs.celebrate {
                self.celebration.start(width, height, now);
            }
        }

        self.celebration.update(now);
    }

    fn on_key(&mut self, key: KeyEvent) -> Result<Action, TimerError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Action::Quit);
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Ok(Action::Quit),
            KeyCode::Char('r') => {
                self.restart()?;
                Ok(Action::Continue)
            }
            _ => Ok(Action::Continue),
        }
    }

    /// Same duration, from the top.
    pub fn restart(&mut self) -> Result<(), TimerError> {
        self.timer.reset();
        self.celebration.stop();
        self.watcher.observe(&self.timer.snapshot());
        self.timer.start()?;
        self.last_snapshot = self.timer.snapshot();
        self.watcher.observe(&self.last_snapshot);
        tracing::info!(total_seconds = self.timer.total_seconds(), "countdown restarted");
        Ok(())
    }
}
