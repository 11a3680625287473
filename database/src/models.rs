use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::DistanceUnit;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Player,
    Admin,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Player => write!(f, "player"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(UserRole::Player),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {other}")),
        }
    }
}

/// The signed-in user's profile. Auth itself lives elsewhere; the game only
/// reads preferences from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub distance_unit: DistanceUnit,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            role: UserRole::default(),
            avatar_url: None,
            distance_unit: DistanceUnit::default(),
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Success,
    NoMatch,
    Failed,
}

impl Display for ScrapeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeStatus::Success => write!(f, "success"),
            ScrapeStatus::NoMatch => write!(f, "no_match"),
            ScrapeStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScrapeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ScrapeStatus::Success),
            "no_match" => Ok(ScrapeStatus::NoMatch),
            "failed" => Ok(ScrapeStatus::Failed),
            other => Err(format!("Unknown scrape status: {other}")),
        }
    }
}

/// One attempt by the image backfill job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperLog {
    pub id: Option<i64>,
    pub event_id: Option<Uuid>,
    pub status: ScrapeStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ScraperLog {
    pub fn new(event_id: Option<Uuid>, status: ScrapeStatus, message: impl Into<String>) -> Self {
        Self {
            id: None,
            event_id,
            status,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub enabled: bool,
    pub batch_size: u32,
    pub search_suffix: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: 10,
            search_suffix: "historical photograph".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_through_text() {
        for role in [UserRole::Player, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
        for status in [
            ScrapeStatus::Success,
            ScrapeStatus::NoMatch,
            ScrapeStatus::Failed,
        ] {
            assert_eq!(status.to_string().parse::<ScrapeStatus>(), Ok(status));
        }
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn scraper_settings_fill_in_defaults() {
        let settings: ScraperSettings = serde_json::from_str(r#"{"batch_size": 3}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.batch_size, 3);
        assert_eq!(settings.search_suffix, "historical photograph");
    }

    #[test]
    fn new_profiles_are_players_in_km() {
        let profile = UserProfile::new("ada");
        assert!(!profile.is_admin());
        assert_eq!(profile.distance_unit, DistanceUnit::Km);
    }
}
