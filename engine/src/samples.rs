use types::HistoricalEvent;

const SAMPLE_EVENTS: &str = include_str!("../data/sample_events.yaml");

/// The built-in event set, used when no database or YAML file is given.
pub fn sample_events() -> Result<Vec<HistoricalEvent>, serde_yaml::Error> {
    serde_yaml::from_str(SAMPLE_EVENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_events_parse_with_valid_coordinates() {
        let events = sample_events().expect("sample_events.yaml should parse");
        assert!(events.len() >= 5);
        for event in &events {
            assert!(
                event.location().is_valid(),
                "{} has bad coordinates",
                event.description
            );
            assert!(!event.location_name.is_empty());
        }
        let ids: HashSet<_> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), events.len());
    }
}
