use serde::{Deserialize, Serialize};
use types::{Achievements, Coordinates, Guess, HintsUsed, HistoricalEvent, RoundResult, YearBounds};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Tunables for turning errors into points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub max_location_score: u32,
    pub max_time_score: u32,
    pub perfect_distance_km: f64,
    pub max_distance_km: f64,
    pub max_year_error: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            max_location_score: 5000,
            max_time_score: 5000,
            perfect_distance_km: 0.5,
            max_distance_km: 2000.0,
            max_year_error: 100,
        }
    }
}

impl ScoringRules {
    /// Largest value either component maximum may take.
    pub const MAX_COMPONENT_SCORE: u32 = 1_000_000;

    pub fn max_round_score(&self) -> u32 {
        self.max_location_score.saturating_add(self.max_time_score)
    }
}

/// Great-circle distance using the haversine formula.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h a hair past 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

pub fn location_score(distance_km: f64, rules: &ScoringRules) -> u32 {
    if distance_km < rules.perfect_distance_km {
        return rules.max_location_score;
    }
    if distance_km >= rules.max_distance_km {
        return 0;
    }
    let closeness = 1.0 - distance_km / rules.max_distance_km;
    (rules.max_location_score as f64 * closeness * closeness).round() as u32
}

pub fn time_score(year_error: u32, rules: &ScoringRules) -> u32 {
    if year_error == 0 {
        return rules.max_time_score;
    }
    if year_error >= rules.max_year_error {
        return 0;
    }
    let closeness = 1.0 - year_error as f64 / rules.max_year_error as f64;
    (rules.max_time_score as f64 * closeness).round() as u32
}

/// Scores a single round. Missing guess parts, which only happen when the
/// timer runs out, earn nothing for that part. Hints are recorded but do not
/// change points or achievements.
pub fn score_round(
    round: u32,
    event: &HistoricalEvent,
    guess: Guess,
    hints_used: HintsUsed,
    rules: &ScoringRules,
) -> RoundResult {
    let distance_error_km = guess
        .location
        .map(|location| distance_km(location, event.location()));
    let year_error = guess.year.map(|year| year.abs_diff(event.year()));

    let location_score = distance_error_km.map_or(0, |d| location_score(d, rules));
    let time_score = year_error.map_or(0, |err| time_score(err, rules));

    let perfect_location = distance_error_km.is_some_and(|d| d < rules.perfect_distance_km);
    let perfect_time = year_error == Some(0);

    log::debug!(
        "Round {round}: distance {distance_error_km:?} km -> {location_score}, year error {year_error:?} -> {time_score}"
    );

    RoundResult {
        round,
        event: event.clone(),
        guess,
        location_score,
        time_score,
        total_score: location_score.saturating_add(time_score),
        distance_error_km,
        year_error,
        achievements: Achievements {
            perfect_location,
            perfect_time,
            perfect: perfect_location && perfect_time,
        },
        hints_used,
    }
}

/// An untouched year slider rests on the middle of the bounds.
pub fn year_or_default(guess: Guess, bounds: &YearBounds) -> Guess {
    Guess {
        year: Some(guess.year.unwrap_or_else(|| bounds.midpoint())),
        ..guess
    }
}
