use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct HistoryConfig {
    pub export_path: String,
    pub recent_count: usize,
}

impl Validate for HistoryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.export_path.trim().is_empty() {
            return Err("history.export_path must not be empty".to_string());
        }
        if self.recent_count == 0 {
            return Err("history.recent_count must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            export_path: "game_history.csv".to_string(),
            recent_count: 5,
        }
    }
}
