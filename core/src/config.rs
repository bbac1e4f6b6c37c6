use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::DEFAULT_STORAGE_KEY;

/// Knobs for a [`Scorer`](crate::scorer::Scorer). Missing fields take their
/// defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ScorerConfig {
    /// Key the player list is stored under.
    pub storage_key: String,
    /// Refuse to remove the only remaining player. Off by default, in which
    /// case it is up to the presentation to hide the remove control.
    pub keep_last_player: bool,
}

impl ScorerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            keep_last_player: false,
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid scorer configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);
