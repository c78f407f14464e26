use crate::model::Difficulty;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "prajna-krida";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Where the high-score ledger lives; the platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Loads the player's settings, writing defaults when none exist yet.
    pub fn load() -> Self {
        let path = Self::settings_path();
        match Self::load_from(&path) {
            Some(settings) => settings,
            None => {
                let default = Settings::default();
                if let Err(err) = default.save_to(&path) {
                    warn!(target: "settings", "Could not write default settings: {err}");
                }
                default
            }
        }
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.migrate();
                Some(settings)
            }
            Err(err) => {
                warn!(target: "settings", "Ignoring unreadable settings at {}: {err}", path.display());
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir().join("high_scores.json")
    }

    fn settings_path() -> PathBuf {
        default_data_dir().join("settings.json")
    }

    fn migrate(&mut self) {
        if self.version == 0 {
            self.version = 1;
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// Seed for the offline riddle deck; ignored when not a valid u64.
    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.trim().parse::<u64>().ok())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
