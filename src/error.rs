//! Errors surfaced while starting the game. The simulation itself never
//! fails.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has wrongly typed keys
    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config values that cannot produce a playable game
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
