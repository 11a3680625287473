use thiserror::Error;
use types::{Coordinates, HintKind, HintState, HistoricalEvent, Region, YearBounds};

const TIME_HINT_SPAN_YEARS: i32 = 50;
const LOCATION_HINT_CELL_DEGREES: f64 = 30.0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    #[error("Hints are disabled for this game")]
    Disabled,

    #[error("The {0} hint was already used this round")]
    AlreadyUsed(HintKind),

    #[error("No hints left this round")]
    Exhausted,
}

/// Reveals one hint for the current round. A rejected request leaves
/// `hints` exactly as it was.
pub fn use_hint(
    hints: &mut HintState,
    kind: HintKind,
    event: &HistoricalEvent,
    bounds: &YearBounds,
    hints_enabled: bool,
) -> Result<(), HintError> {
    if !hints_enabled {
        return Err(HintError::Disabled);
    }
    if hints.is_used(kind) {
        return Err(HintError::AlreadyUsed(kind));
    }
    if hints.available == 0 {
        return Err(HintError::Exhausted);
    }

    match kind {
        HintKind::Time => {
            hints.time_hint_range = Some(time_window(event.year(), bounds));
            hints.time_hint_used = true;
        }
        HintKind::Location => {
            hints.location_hint_region = Some(location_cell(event.location()));
            hints.location_hint_used = true;
        }
    }
    hints.available -= 1;
    log::info!("Revealed {kind} hint, {} left", hints.available);
    Ok(())
}

pub fn reset(hints: &mut HintState) {
    *hints = HintState::default();
}

/// The fixed half-century containing `year`, trimmed to the guessable range.
pub fn time_window(year: i32, bounds: &YearBounds) -> (i32, i32) {
    let start = year - year.rem_euclid(TIME_HINT_SPAN_YEARS);
    let end = start + TIME_HINT_SPAN_YEARS - 1;
    (bounds.clamp(start), bounds.clamp(end))
}

/// The grid cell containing `point`. Cells are grid aligned so the answer
/// is not at the center.
pub fn location_cell(point: Coordinates) -> Region {
    let cell = LOCATION_HINT_CELL_DEGREES;
    let min_latitude = ((point.latitude / cell).floor() * cell).clamp(-90.0, 90.0 - cell);
    let min_longitude = ((point.longitude / cell).floor() * cell).clamp(-180.0, 180.0 - cell);

    let north_south = if point.latitude >= 0.0 {
        "Northern"
    } else {
        "Southern"
    };
    let east_west = if point.longitude >= 0.0 {
        "Eastern"
    } else {
        "Western"
    };

    Region {
        label: format!("{north_south} / {east_west} hemisphere"),
        min_latitude,
        max_latitude: min_latitude + cell,
        min_longitude,
        max_longitude: min_longitude + cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event() -> HistoricalEvent {
        HistoricalEvent::new(
            "Eiffel Tower opens",
            NaiveDate::from_ymd_opt(1889, 3, 31).unwrap(),
            Coordinates::new(48.8584, 2.2945),
            "Paris",
        )
    }

    #[test]
    fn each_hint_used_at_most_once() {
        let mut hints = HintState::default();
        let bounds = YearBounds::default();
        let event = event();

        use_hint(&mut hints, HintKind::Time, &event, &bounds, true).unwrap();
        assert_eq!(hints.available, 1);
        assert_eq!(hints.time_hint_range, Some((1850, 1899)));

        let before = hints.clone();
        assert_eq!(
            use_hint(&mut hints, HintKind::Time, &event, &bounds, true),
            Err(HintError::AlreadyUsed(HintKind::Time))
        );
        assert_eq!(hints, before);

        use_hint(&mut hints, HintKind::Location, &event, &bounds, true).unwrap();
        assert_eq!(hints.available, 0);
        assert_eq!(hints.used_count(), 2);
        let region = hints.location_hint_region.clone().unwrap();
        assert!(region.contains(event.location()));
        assert_eq!(region.label, "Northern / Eastern hemisphere");
    }

    #[test]
    fn usage_never_exceeds_two_per_round() {
        let mut hints = HintState::default();
        let bounds = YearBounds::default();
        let event = event();
        for kind in [
            HintKind::Time,
            HintKind::Location,
            HintKind::Time,
            HintKind::Location,
        ] {
            let _ = use_hint(&mut hints, kind, &event, &bounds, true);
            assert!(hints.used_count() <= 2);
        }
        assert_eq!(hints.available, 0);
    }

    #[test]
    fn exhausted_hints_are_rejected_without_charge() {
        let mut hints = HintState {
            available: 0,
            ..HintState::default()
        };
        let result = use_hint(
            &mut hints,
            HintKind::Location,
            &event(),
            &YearBounds::default(),
            true,
        );
        assert_eq!(result, Err(HintError::Exhausted));
        assert!(!hints.location_hint_used);
        assert!(hints.location_hint_region.is_none());
    }

    #[test]
    fn disabled_hints_are_rejected() {
        let mut hints = HintState::default();
        let result = use_hint(
            &mut hints,
            HintKind::Time,
            &event(),
            &YearBounds::default(),
            false,
        );
        assert_eq!(result, Err(HintError::Disabled));
        assert_eq!(hints, HintState::default());
    }

    #[test]
    fn reset_restores_fresh_round() {
        let mut hints = HintState::default();
        use_hint(
            &mut hints,
            HintKind::Time,
            &event(),
            &YearBounds::default(),
            true,
        )
        .unwrap();
        reset(&mut hints);
        assert_eq!(hints, HintState::default());
    }

    #[test]
    fn time_window_is_clamped_to_bounds() {
        let bounds = YearBounds::new(1860, 2024);
        assert_eq!(time_window(1855, &bounds), (1860, 1899));
        assert_eq!(time_window(2010, &bounds), (2000, 2024));
        assert_eq!(time_window(1950, &bounds), (1950, 1999));
    }

    #[test]
    fn location_cell_handles_edges() {
        let south_pole = location_cell(Coordinates::new(-90.0, -180.0));
        assert_eq!(south_pole.min_latitude, -90.0);
        assert_eq!(south_pole.min_longitude, -180.0);

        let date_line = location_cell(Coordinates::new(90.0, 180.0));
        assert_eq!(date_line.max_latitude, 90.0);
        assert_eq!(date_line.max_longitude, 180.0);
        assert!(date_line.contains(Coordinates::new(90.0, 180.0)));

        let sydney = location_cell(Coordinates::new(-33.8688, 151.2093));
        assert_eq!(sydney.label, "Southern / Eastern hemisphere");
        assert!(sydney.contains(Coordinates::new(-33.8688, 151.2093)));
    }
}
