use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    #[value(name = "single")]
    SinglePlayer,
    #[value(name = "multi")]
    Multiplayer,
}
