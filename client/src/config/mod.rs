mod config;
mod game_mode;
mod history_config;
mod search_config;

pub use config::{Config, get_config_manager};
pub use game_mode::GameMode;
pub use history_config::HistoryConfig;
pub use search_config::SearchConfig;
