use std::path::PathBuf;
use std::time::Duration;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::{Difficulty, SymbolPair};
use common::session::PlayerNames;
use serde::{Deserialize, Serialize};

use super::{GameMode, HistoryConfig, SearchConfig};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";
const MIN_TIME_LIMIT_SECS: u64 = 5;
const MAX_TIME_LIMIT_SECS: u64 = 30;

pub const AI_PLAYER_NAME: &str = "AI 🤖";

pub fn default_config_path() -> PathBuf {
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
    ConfigManager::from_yaml_file(path.unwrap_or_else(default_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub player1_name: String,
    pub player2_name: String,
    pub symbols: SymbolPair,
    pub time_limit_secs: u64,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// In single-player mode the second seat always belongs to the bot.
    pub fn player_names(&self) -> PlayerNames {
        match self.mode {
            GameMode::SinglePlayer => PlayerNames::new(self.player1_name.clone(), AI_PLAYER_NAME),
            GameMode::Multiplayer => {
                PlayerNames::new(self.player1_name.clone(), self.player2_name.clone())
            }
        }
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.player1_name.trim().is_empty() || self.player2_name.trim().is_empty() {
            return Err("player names must not be empty".to_string());
        }
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs) {
            return Err(format!(
                "time_limit_secs must be between {} and {}",
                MIN_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS
            ));
        }
        self.symbols.validate()?;
        self.search.validate()?;
        self.history.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            difficulty: Difficulty::Hard,
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            symbols: SymbolPair::default(),
            time_limit_secs: 10,
            search: SearchConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}
