use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Coordinates, DistanceUnit, HistoricalEvent};

/// What the player has placed so far in the current round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub location: Option<Coordinates>,
    pub year: Option<i32>,
}

impl Guess {
    pub fn new(location: Coordinates, year: i32) -> Self {
        Self {
            location: Some(location),
            year: Some(year),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.year.is_none()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub perfect_location: bool,
    pub perfect_time: bool,
    pub perfect: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintsUsed {
    pub time: bool,
    pub location: bool,
}

impl HintsUsed {
    pub fn count(&self) -> u32 {
        self.time as u32 + self.location as u32
    }
}

/// The scored outcome of one round. Never modified once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub event: HistoricalEvent,
    pub guess: Guess,
    pub location_score: u32,
    pub time_score: u32,
    pub total_score: u32,
    pub distance_error_km: Option<f64>,
    pub year_error: Option<u32>,
    pub achievements: Achievements,
    pub hints_used: HintsUsed,
}

impl RoundResult {
    pub fn describe(&self, unit: DistanceUnit) -> String {
        let distance = self
            .distance_error_km
            .map(|km| unit.format_distance(km))
            .unwrap_or_else(|| "no location guessed".to_string());
        let years = self
            .year_error
            .map(|err| format!("{err} years off"))
            .unwrap_or_else(|| "no year guessed".to_string());
        format!(
            "Round {}: {} points ({} location, {} time) | {distance} | {years}",
            self.round, self.total_score, self.location_score, self.time_score
        )
    }
}

/// Session totals folded from every round result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub rounds: u32,
    pub total_score: u32,
    pub max_possible_score: u32,
    pub perfect_locations: u32,
    pub perfect_years: u32,
    pub perfect_scores: u32,
    pub hints_used_count: u32,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} / {} points over {} rounds\nPerfect locations: {}\nPerfect years: {}\nPerfect rounds: {}\nHints used: {}",
            self.total_score,
            self.max_possible_score,
            self.rounds,
            self.perfect_locations,
            self.perfect_years,
            self.perfect_scores,
            self.hints_used_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result(distance_error_km: Option<f64>, year_error: Option<u32>) -> RoundResult {
        RoundResult {
            round: 2,
            event: HistoricalEvent::new(
                "Moon landing broadcast",
                NaiveDate::from_ymd_opt(1969, 7, 20).unwrap(),
                Coordinates::new(29.5593, -95.09),
                "Houston",
            ),
            guess: Guess::default(),
            location_score: 1250,
            time_score: 4950,
            total_score: 6200,
            distance_error_km,
            year_error,
            achievements: Achievements::default(),
            hints_used: HintsUsed::default(),
        }
    }

    #[test]
    fn describe_uses_distance_unit() {
        let result = result(Some(1000.0), Some(1));
        assert_eq!(
            result.describe(DistanceUnit::Km),
            "Round 2: 6200 points (1250 location, 4950 time) | 1000 km | 1 years off"
        );
        assert!(result.describe(DistanceUnit::Miles).contains("621 mi"));
    }

    #[test]
    fn describe_handles_missing_parts() {
        let description = result(None, None).describe(DistanceUnit::Km);
        assert!(description.contains("no location guessed"));
        assert!(description.contains("no year guessed"));
    }

    #[test]
    fn hints_used_count() {
        assert_eq!(HintsUsed::default().count(), 0);
        let both = HintsUsed {
            time: true,
            location: true,
        };
        assert_eq!(both.count(), 2);
    }
}
