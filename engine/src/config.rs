use std::path::Path;

use serde::{Deserialize, Serialize};
use types::{DistanceUnit, GameSettings, SettingUpdate, YearBounds, MAX_TIMER_MINUTES};

use crate::{error::ConfigError, scoring::ScoringRules};

/// Everything a game needs up front. Built once and handed to
/// [`crate::GameState::new`]; nothing reads settings from globals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_rounds: u32,
    pub settings: GameSettings,
    pub rules: ScoringRules,
    pub year_bounds: YearBounds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: 5,
            settings: GameSettings::default(),
            rules: ScoringRules::default(),
            year_bounds: YearBounds::default(),
        }
    }
}

/// Command-line values that win over the YAML file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub total_rounds: Option<u32>,
    pub timer_minutes: Option<u32>,
    pub hints_enabled: Option<bool>,
    pub distance_unit: Option<DistanceUnit>,
}

impl ConfigOverrides {
    fn updates(&self) -> Vec<SettingUpdate> {
        let mut updates = Vec::new();
        if let Some(minutes) = self.timer_minutes {
            updates.push(SettingUpdate::TimerEnabled(true));
            updates.push(SettingUpdate::TimerDuration(minutes));
        }
        if let Some(enabled) = self.hints_enabled {
            updates.push(SettingUpdate::HintsEnabled(enabled));
        }
        if let Some(unit) = self.distance_unit {
            updates.push(SettingUpdate::DistanceUnit(unit));
        }
        updates
    }
}

impl GameConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_cli_or_yaml(
        overrides: &ConfigOverrides,
        yaml_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = match yaml_path {
            Some(path) => {
                log::info!("Loading game config from {}", path.display());
                Self::from_yaml_str(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };

        if let Some(rounds) = overrides.total_rounds {
            config.total_rounds = rounds;
        }
        for update in overrides.updates() {
            log::debug!("Config override: {update}");
            config.settings.apply(update);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::Invalid("total_rounds must be at least 1".into()));
        }
        let minutes = self.settings.timer_duration_minutes;
        if !(1..=MAX_TIMER_MINUTES).contains(&minutes) {
            return Err(ConfigError::Invalid(format!(
                "timer_duration_minutes must be between 1 and {MAX_TIMER_MINUTES}, got {minutes}"
            )));
        }
        for (name, max) in [
            ("max_location_score", self.rules.max_location_score),
            ("max_time_score", self.rules.max_time_score),
        ] {
            if max > ScoringRules::MAX_COMPONENT_SCORE {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {}, got {max}",
                    ScoringRules::MAX_COMPONENT_SCORE
                )));
            }
        }
        if self.rules.max_distance_km <= self.rules.perfect_distance_km {
            return Err(ConfigError::Invalid(
                "max_distance_km must exceed perfect_distance_km".into(),
            ));
        }
        if self.rules.max_year_error == 0 {
            return Err(ConfigError::Invalid("max_year_error must be at least 1".into()));
        }
        Ok(())
    }
}
