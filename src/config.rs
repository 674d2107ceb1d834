use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FPS, HORDE_LAYERS, LAYER_SPACING, SHIELD_HEIGHT};
use crate::error::{GameError, Result};
use crate::horde::HordeConfig;
use crate::ship::ShipKind;

/// User configuration loaded from the config file.
/// Missing keys fall back to defaults; CLI flags override the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frames per second (1-240)
    pub fps: u32,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
    pub horde: HordeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fps: DEFAULT_FPS,
            seed: None,
            horde: HordeConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values that would not give a playable game.
    pub fn validate(&self) -> Result<()> {
        if !(1..=240).contains(&self.fps) {
            return Err(GameError::InvalidConfig(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }

        let h = &self.horde;
        if !(h.mystery_min > 0.0 && h.mystery_min < h.mystery_max) {
            return Err(GameError::InvalidConfig(format!(
                "mystery interval must satisfy 0 < min < max, got [{}, {})",
                h.mystery_min, h.mystery_max
            )));
        }

        let tallest = ShipKind::ALL
            .iter()
            .map(|k| k.profile().height)
            .max()
            .unwrap_or(0);
        let bottom = h.height + (HORDE_LAYERS as i32 - 1) * LAYER_SPACING + tallest;
        if h.height < 0 || bottom >= SHIELD_HEIGHT {
            return Err(GameError::InvalidConfig(format!(
                "horde height {} does not fit between the top edge and the shields",
                h.height
            )));
        }

        Ok(())
    }
}

/// Default config file: `<config dir>/space_invaders/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("space_invaders").join("config.toml"))
}

/// Load and validate the config.
///
/// An explicit `path` must exist; the default path is optional and its
/// absence yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match config_path() {
            Some(p) => (p, false),
            None => return Ok(GameConfig::default()),
        },
    };

    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => GameConfig::from_toml(&contents, &path)?,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => GameConfig::default(),
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}

/// Default config file with every option commented out.
pub fn default_config_string() -> String {
    r#"# space_invaders configuration
# CLI flags override these settings.

# Target FPS (1-240)
# fps = 120

# Fixed RNG seed, for replaying the same game
# seed = 42

[horde]
# y of the top row of ships
# height = 75

# Random delay between two mystery ships, in seconds
# mystery_min = 10.0
# mystery_max = 30.0
"#
    .to_string()
}
