use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on the globe, in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{ns}, {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

/// A photographed moment in history that a round asks the player to place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
}

impl HistoricalEvent {
    pub fn new(
        description: impl Into<String>,
        date: NaiveDate,
        location: Coordinates,
        location_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            image_url: None,
            date,
            latitude: location.latitude,
            longitude: location.longitude,
            location_name: location_name.into(),
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl Display for HistoricalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.description,
            self.location_name,
            self.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_comes_from_date() {
        let event = HistoricalEvent::new(
            "Eiffel Tower opens",
            NaiveDate::from_ymd_opt(1889, 3, 31).unwrap(),
            Coordinates::new(48.8584, 2.2945),
            "Paris",
        );
        assert_eq!(event.year(), 1889);
        assert_eq!(event.location(), Coordinates::new(48.8584, 2.2945));
        assert_eq!(event.to_string(), "Eiffel Tower opens (Paris, 1889)");
    }

    #[test]
    fn coordinates_validity() {
        assert!(Coordinates::new(0.0, 0.0).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn coordinates_display_uses_hemispheres() {
        let sydney = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(sydney.to_string(), "33.8688°S, 151.2093°E");
    }

    #[test]
    fn events_deserialize_from_yaml() {
        let yaml = r#"
id: 7f1c2b1e-9d7a-4c55-8a51-0f6a3c1f3d10
description: Moon landing broadcast
image_url: null
date: 1969-07-20
latitude: 28.5721
longitude: -80.648
location_name: Cape Canaveral
"#;
        let event: HistoricalEvent = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(event.year(), 1969);
        assert!(event.image_url.is_none());
    }

    #[test]
    fn yaml_events_without_id_get_one() {
        let yaml = r#"
- description: Berlin Wall falls
  date: 1989-11-09
  latitude: 52.5163
  longitude: 13.3777
  location_name: Berlin
- description: Golden Gate Bridge opens
  date: 1937-05-27
  latitude: 37.8199
  longitude: -122.4783
  location_name: San Francisco
"#;
        let events: Vec<HistoricalEvent> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(events.len(), 2);
        assert_ne!(events[0].id, events[1].id);
        assert!(events.iter().all(|e| e.image_url.is_none()));
    }
}
