use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

const KM_PER_MILE: f64 = 1.609_344;

/// Longest round timer a game accepts.
pub const MAX_TIMER_MINUTES: u32 = 24 * 60;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    /// Converts a distance measured in kilometers into this unit.
    pub fn convert_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Km => km,
            DistanceUnit::Miles => km / KM_PER_MILE,
        }
    }

    pub fn format_distance(&self, km: f64) -> String {
        let value = self.convert_km(km);
        if value < 10.0 {
            format!("{value:.1} {self}")
        } else {
            format!("{value:.0} {self}")
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "km" | "kilometers" => Ok(DistanceUnit::Km),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(format!("Unknown distance unit: {other}")),
        }
    }
}

impl Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceUnit::Km => write!(f, "km"),
            DistanceUnit::Miles => write!(f, "mi"),
        }
    }
}

/// Player-facing options. Editable between games only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub timer_enabled: bool,
    pub timer_duration_minutes: u32,
    pub hints_enabled: bool,
    pub distance_unit: DistanceUnit,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_duration_minutes: 5,
            hints_enabled: true,
            distance_unit: DistanceUnit::Km,
        }
    }
}

impl GameSettings {
    pub fn timer_duration_seconds(&self) -> u32 {
        self.timer_duration_minutes.saturating_mul(60)
    }

    pub fn apply(&mut self, update: SettingUpdate) {
        match update {
            SettingUpdate::TimerEnabled(enabled) => self.timer_enabled = enabled,
            SettingUpdate::TimerDuration(minutes) => {
                self.timer_duration_minutes = minutes.clamp(1, MAX_TIMER_MINUTES)
            }
            SettingUpdate::HintsEnabled(enabled) => self.hints_enabled = enabled,
            SettingUpdate::DistanceUnit(unit) => self.distance_unit = unit,
        }
    }
}

/// A change to exactly one setting, carrying its own payload type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingUpdate {
    TimerEnabled(bool),
    TimerDuration(u32),
    HintsEnabled(bool),
    DistanceUnit(DistanceUnit),
}

impl Display for SettingUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingUpdate::TimerEnabled(enabled) => write!(f, "timer enabled = {enabled}"),
            SettingUpdate::TimerDuration(minutes) => write!(f, "timer duration = {minutes} min"),
            SettingUpdate::HintsEnabled(enabled) => write!(f, "hints enabled = {enabled}"),
            SettingUpdate::DistanceUnit(unit) => write!(f, "distance unit = {unit}"),
        }
    }
}

/// The inclusive range of years a guess may take.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 1850,
            max: 2024,
        }
    }
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    pub fn midpoint(&self) -> i32 {
        self.min + (self.max - self.min) / 2
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}
