use serde::{Deserialize, Serialize};
use snake_common::SnakeSettings;
use snake_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer, check_range,
};
use std::path::PathBuf;
use std::time::Duration;

use super::WindowConfig;

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path_override: Option<PathBuf>) -> ClientConfigManager {
    ConfigManager::from_yaml_file(path_override.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: SnakeSettings,
    pub window: WindowConfig,
    /// Length of each of the "3, 2, 1" countdown steps.
    pub countdown_step_ms: u64,
    /// How long the dead snake stays on screen before a new game can start.
    pub game_over_pause_ms: u64,
}

impl Config {
    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.window.validate()?;
        check_range("Countdown step (ms)", self.countdown_step_ms, 0..=5000)?;
        check_range("Game over pause (ms)", self.game_over_pause_ms, 0..=10000)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: SnakeSettings::default(),
            window: WindowConfig::default(),
            countdown_step_ms: 500,
            game_over_pause_ms: 1000,
        }
    }
}
