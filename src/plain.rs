//! Line-oriented countdown for when stdout is not a terminal.

use std::{error::Error, io::Write, time::Duration};

use crate::{
    notify::{FinishWatcher, Notifier},
    timer::{Clock, TimerState, Timer},
};

/// Run `timer` to completion, printing `MM:SS` each time the remaining
/// second changes. `pause` is called between polls with the tick interval.
pub fn run<C, W, P>(
    timer: &mut Timer<C>,
    out: &mut W,
    notifier: &mut dyn Notifier,
    tick: Duration,
    mut pause: P,
) -> Result<(), Box<dyn Error>>
where
    C: Clock,
    W: Write,
    P: FnMut(Duration),
{
    let mut watcher = FinishWatcher::new();
    timer.start()?;
    watcher.observe(&timer.snapshot());
    tracing::info!(total_seconds = timer.total_seconds(), "plain countdown started");

    let mut shown = None;
    loop {
        let snapshot = timer.update();
        if shown != Some(snapshot.remaining_seconds) {
            writeln!(out, "{}", snapshot.formatted())?;
            out.flush()?;
            shown = Some(snapshot.remaining_seconds);
        }

        if watcher.observe(&snapshot) {
            tracing::info!(total_seconds = snapshot.total_seconds, "countdown finished");
            notifier.notify(&snapshot)?;
            writeln!(out, "time's up!")?;
        }

        if snapshot.state == TimerState::Finished {
            return Ok(());
        }
        pause(tick);
    }
}
