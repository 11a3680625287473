use thiserror::Error;
use types::GameStatus;

use crate::hints::HintError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("No historical events available to build a game")]
    NoEvents,

    #[error("Cannot {action} while the game is {from}")]
    InvalidTransition { from: GameStatus, action: &'static str },

    #[error("Place a marker on the map before submitting")]
    MissingLocation,

    #[error("Coordinates out of range: {latitude}, {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("Event {description:?} has coordinates out of range: {latitude}, {longitude}")]
    InvalidEvent {
        description: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Settings cannot change while a game is running")]
    SettingsLocked,

    #[error("Hint rejected: {0}")]
    Hint(#[from] HintError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
