use std::io::{self, Write};

use crate::timer::{TimerSnapshot, TimerState};

/// Turns the level query "is the timer finished?" into a one-shot edge.
#[derive(Debug, Clone, Copy)]
pub struct FinishWatcher {
    last: TimerState,
}

impl FinishWatcher {
    pub fn new() -> Self {
        Self {
            last: TimerState::Idle,
        }
    }

    /// True exactly when this observation is the `Running -> Finished` transition.
    pub fn observe(&mut self, snapshot: &TimerSnapshot) -> bool {
        let fired = self.last == TimerState::Running && snapshot.state == TimerState::Finished;
        self.last = snapshot.state;
        fired
    }
}

impl Default for FinishWatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that tells the user the countdown is over
pub trait Notifier {
    fn notify(&mut self, snapshot: &TimerSnapshot) -> io::Result<()>;
}

/// Rings the terminal bell on the wrapped writer
#[derive(Debug)]
pub struct BellNotifier<W: Write> {
    out: W,
}

impl<W: Write> BellNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for BellNotifier<W> {
    fn notify(&mut self, _snapshot: &TimerSnapshot) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

/// Used when the bell is switched off in preferences
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _snapshot: &TimerSnapshot) -> io::Result<()> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, snapshot: &TimerSnapshot) -> io::Result<()> {
        (**self).notify(snapshot)
    }
}
