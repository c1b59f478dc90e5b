use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::ConfigError;
use common::{SnakeConfig, SnakeConfigOverrides};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: SnakeConfig,
    pub use_log_prefix: bool,
}

impl Config {
    /// The `game` section with command-line overrides applied, validated as
    /// a whole. A file value out of range is fine when an override replaces it.
    pub fn game_config(&self, overrides: &SnakeConfigOverrides) -> Result<SnakeConfig, ConfigError> {
        self.game.apply(overrides).validated()
    }
}

impl Validate for Config {
    // `game` is checked by `game_config` once the overrides are merged
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
