use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tmr::{
    app::{Action, App},
    config::Preferences,
    notify::Notifier,
    runtime::{FixedTicker, Runner, TestEventSource, TimerEvent},
    timer::{ManualClock, Timer, TimerSnapshot, TimerState},
};

#[derive(Clone, Default)]
struct Bells(Rc<Cell<u32>>);

impl Notifier for Bells {
    fn notify(&mut self, snapshot: &TimerSnapshot) -> io::Result<()> {
        assert_eq!(snapshot.state, TimerState::Finished);
        self.0.set(self.0.get() + 1);
        Ok(())
    }
}

// Headless run of the full driving loop without a TTY: parsed config, app,
// runner and a simulated clock.
#[test]
fn headless_countdown_rings_once() {
    let config = tmr::parse(&["--seconds", "3"]).unwrap();
    let clock = ManualClock::new();
    let bells = Bells::default();
    let mut app = App::new(
        Timer::with_clock(config.duration_seconds, clock.clone()),
        Preferences::default(),
        Box::new(bells.clone()),
    )
    .unwrap();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(1)));

    let mut seen = Vec::new();
    for _ in 0..40u32 {
        let action = app.handle(runner.step(), (80, 24)).unwrap();
        assert_eq!(action, Action::Continue);
        seen.push(app.snapshot().remaining_seconds);
        clock.advance(Duration::from_millis(250));
    }

    assert!(app.timer.is_finished());
    assert_eq!(app.snapshot().remaining_seconds, 0);
    assert_eq!(bells.0.get(), 1, "bell must ring exactly once");
    assert!(seen.windows(2).all(|w| w[1] <= w[0]), "remaining never goes up");
    assert_eq!(seen.first(), Some(&3));
}

#[test]
fn headless_quit_key_stops_loop() {
    let clock = ManualClock::new();
    let mut app = App::new(
        Timer::with_clock(60, clock.clone()),
        Preferences::default(),
        Box::new(Bells::default()),
    )
    .unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(5)));
    tx.send(TimerEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)))
        .unwrap();

    let mut steps = 0;
    while app.handle(runner.step(), (80, 24)).unwrap() == Action::Continue {
        steps += 1;
        assert!(steps < 100, "quit key was not handled");
    }
    assert_eq!(app.snapshot().state, TimerState::Running);
}

#[test]
fn headless_restart_after_finish() {
    let clock = ManualClock::new();
    let bells = Bells::default();
    let mut app = App::new(
        Timer::with_clock(2, clock.clone()),
        Preferences::default(),
        Box::new(bells.clone()),
    )
    .unwrap();

    clock.advance(Duration::from_secs(5));
    app.handle(TimerEvent::Tick, (80, 24)).unwrap();
    assert!(app.timer.is_finished());

    let restart = TimerEvent::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
    app.handle(restart, (80, 24)).unwrap();
    assert_eq!(app.snapshot().state, TimerState::Running);
    assert_eq!(app.timer.formatted_time(), "00:02");

    clock.advance(Duration::from_secs(2));
    app.handle(TimerEvent::Tick, (80, 24)).unwrap();
    assert_eq!(bells.0.get(), 2);
}
