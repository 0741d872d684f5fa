use common::config::Validate;
use common::games::tictactoe::{CELL_COUNT, DEFAULT_MAX_DEPTH, SearchLimits};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// `null` searches every line to the end of the game.
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub memoize: bool,
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            memoize: self.memoize,
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(depth) = self.max_depth
            && !(1..=CELL_COUNT).contains(&depth)
        {
            return Err(format!(
                "search.max_depth must be between 1 and {} or null",
                CELL_COUNT
            ));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            memoize: false,
        }
    }
}
