use std::path::{Path, PathBuf};

use space_invaders::config::{default_config_string, load_config, GameConfig};
use space_invaders::constants::{DEFAULT_FPS, HORDE_HEIGHT};
use space_invaders::GameError;

fn parse(contents: &str) -> Result<GameConfig, GameError> {
    GameConfig::from_toml(contents, Path::new("config.toml"))
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "space_invaders_{}_{}.toml",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

// ── parsing ───────────────────────────────────────────────────────────────────

#[test]
fn empty_file_gives_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.fps, DEFAULT_FPS);
    assert_eq!(config.seed, None);
    assert_eq!(config.horde.height, HORDE_HEIGHT);
}

#[test]
fn default_config_string_is_all_defaults() {
    let config = parse(&default_config_string()).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = parse("seed = 7\n[horde]\nmystery_min = 2.5\n").unwrap();
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.fps, DEFAULT_FPS);
    assert_eq!(config.horde.mystery_min, 2.5);
    assert_eq!(config.horde.mystery_max, 30.0);
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = parse("fps = \"fast\"").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

// ── validation ────────────────────────────────────────────────────────────────

#[test]
fn defaults_are_valid() {
    assert!(GameConfig::default().validate().is_ok());
}

#[test]
fn fps_out_of_range_rejected() {
    for fps in [0, 241] {
        let config = GameConfig { fps, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }
}

#[test]
fn inverted_mystery_range_rejected() {
    let mut config = GameConfig::default();
    config.horde.mystery_min = 20.0;
    config.horde.mystery_max = 5.0;
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn zero_mystery_delay_rejected() {
    let mut config = GameConfig::default();
    config.horde.mystery_min = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn horde_overlapping_shields_rejected() {
    let mut config = GameConfig::default();
    config.horde.height = 400;
    assert!(config.validate().is_err());
    config.horde.height = -10;
    assert!(config.validate().is_err());
    config.horde.height = 200;
    assert!(config.validate().is_ok());
}

// ── loading ───────────────────────────────────────────────────────────────────

#[test]
fn load_explicit_file() {
    let path = temp_file("explicit", "fps = 60\n");
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.fps, 60);
    let _ = std::fs::remove_file(path);
}

#[test]
fn load_validates() {
    let path = temp_file("invalid", "fps = 1000\n");
    assert!(matches!(
        load_config(Some(&path)),
        Err(GameError::InvalidConfig(_))
    ));
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = std::env::temp_dir().join("space_invaders_does_not_exist.toml");
    assert!(matches!(load_config(Some(&path)), Err(GameError::Io(_))));
}
