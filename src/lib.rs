// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod plain;
pub mod runtime;
pub mod timer;
pub mod ui;
pub mod util;

pub use cli::{parse, Config};
pub use error::{ParseError, TimerError};
pub use timer::{Timer, TimerSnapshot, TimerState};
