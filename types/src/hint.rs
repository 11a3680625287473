use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Coordinates;

pub const HINTS_PER_ROUND: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HintKind {
    Time,
    Location,
}

impl Display for HintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintKind::Time => write!(f, "time"),
            HintKind::Location => write!(f, "location"),
        }
    }
}

/// A latitude/longitude box narrowing where a photo was taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub label: String,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Region {
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (lat {:.0}..{:.0}, lon {:.0}..{:.0})",
            self.label, self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
        )
    }
}

/// Per-round hint bookkeeping. Flags only ever go from unused to used
/// until the round is reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HintState {
    pub available: u8,
    pub time_hint_used: bool,
    pub location_hint_used: bool,
    pub time_hint_range: Option<(i32, i32)>,
    pub location_hint_region: Option<Region>,
}

impl Default for HintState {
    fn default() -> Self {
        Self {
            available: HINTS_PER_ROUND,
            time_hint_used: false,
            location_hint_used: false,
            time_hint_range: None,
            location_hint_region: None,
        }
    }
}

impl HintState {
    pub fn is_used(&self, kind: HintKind) -> bool {
        match kind {
            HintKind::Time => self.time_hint_used,
            HintKind::Location => self.location_hint_used,
        }
    }

    pub fn used_count(&self) -> u8 {
        self.time_hint_used as u8 + self.location_hint_used as u8
    }

    pub fn unused_kinds(&self) -> Vec<HintKind> {
        [HintKind::Time, HintKind::Location]
            .into_iter()
            .filter(|&kind| !self.is_used(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_two_hints() {
        let hints = HintState::default();
        assert_eq!(hints.available, 2);
        assert_eq!(hints.used_count(), 0);
        assert_eq!(hints.unused_kinds(), vec![HintKind::Time, HintKind::Location]);
    }

    #[test]
    fn region_contains_points_inside_it() {
        let region = Region {
            label: "Northern / Eastern hemisphere".to_string(),
            min_latitude: 30.0,
            max_latitude: 60.0,
            min_longitude: 0.0,
            max_longitude: 30.0,
        };
        assert!(region.contains(Coordinates::new(30.0, 0.0)));
        assert!(region.contains(Coordinates::new(48.8566, 2.3522)));
        assert!(!region.contains(Coordinates::new(-33.0, 151.0)));
    }
}
