use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Guess, HintState, YearBounds};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    #[default]
    NotStarted,
    InProgress,
    RoundResult,
    Finished,
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::NotStarted => write!(f, "not-started"),
            GameStatus::InProgress => write!(f, "in-progress"),
            GameStatus::RoundResult => write!(f, "round-result"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Everything a player is allowed to see while guessing. Never includes
/// the answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPrompt {
    pub round: u32,
    pub total_rounds: u32,
    pub event_id: Uuid,
    pub description: String,
    pub image_url: Option<String>,
    pub current_guess: Guess,
    pub hints: HintState,
    pub hints_enabled: bool,
    pub year_bounds: YearBounds,
    pub timer_remaining: Option<u32>,
}

impl Display for RoundPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Round {} of {}", self.round, self.total_rounds)?;
        writeln!(f, "Photo: {}", self.description)?;
        if let Some(url) = &self.image_url {
            writeln!(f, "Image: {url}")?;
        }
        if let Some((from, to)) = self.hints.time_hint_range {
            writeln!(f, "Time hint: between {from} and {to}")?;
        }
        if let Some(region) = &self.hints.location_hint_region {
            writeln!(f, "Location hint: {region}")?;
        }
        if let Some(remaining) = self.timer_remaining {
            writeln!(f, "Time left: {}:{:02}", remaining / 60, remaining % 60)?;
        }
        write!(
            f,
            "Current guess: {} / {}",
            self.current_guess
                .location
                .map(|loc| loc.to_string())
                .unwrap_or("no marker".to_string()),
            self.current_guess
                .year
                .map(|year| year.to_string())
                .unwrap_or("no year".to_string())
        )
    }
}
