use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TICK_MS: u64 = 100;
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1000;

/// User preferences, persisted as JSON. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// how often the clock is redrawn, in milliseconds
    pub tick_ms: u64,
    pub bell: bool,
    pub celebrate: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            bell: true,
            celebrate: true,
        }
    }
}

impl Preferences {
    /// Tick interval clamped to a range that keeps the clock readable
    /// without spinning the CPU.
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "tmr") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tmr_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Preferences {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Preferences::default(),
        };
        match serde_json::from_slice::<Preferences>(&bytes) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable preferences");
                Preferences::default()
            }
        }
    }

    fn save(&self, prefs: &Preferences) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(prefs).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
