pub mod input_guesser;

use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use types::{Action, Coordinates, Guesser, HistoricalEvent, RoundPrompt};
use uuid::Uuid;

pub use crate::input_guesser::InputGuesser;

/// Drops a marker anywhere, picks any year in range, and sometimes peeks at
/// a hint first.
#[derive(Debug)]
pub struct RandomGuesser {
    rng: StdRng,
}

impl Default for RandomGuesser {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomGuesser {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Guesser for RandomGuesser {
    fn select_action(&mut self, prompt: &RoundPrompt, permitted_actions: &[Action]) -> Action {
        let hint = permitted_actions
            .iter()
            .find(|action| matches!(action, Action::UseHint { .. }));
        if let Some(&hint) = hint {
            if self.rng.gen_bool(0.25) {
                return hint;
            }
        }

        if prompt.current_guess.location.is_none() {
            let location = match &prompt.hints.location_hint_region {
                Some(region) => Coordinates::new(
                    self.rng
                        .gen_range(region.min_latitude..=region.max_latitude),
                    self.rng
                        .gen_range(region.min_longitude..=region.max_longitude),
                ),
                None => Coordinates::new(
                    self.rng.gen_range(-90.0..=90.0),
                    self.rng.gen_range(-180.0..=180.0),
                ),
            };
            return Action::PlaceMarker { location };
        }

        if prompt.current_guess.year.is_none() {
            let (from, to) = prompt
                .hints
                .time_hint_range
                .unwrap_or((prompt.year_bounds.min, prompt.year_bounds.max));
            return Action::SetYear {
                year: self.rng.gen_range(from..=to),
            };
        }

        Action::Submit
    }
}

/// Knows every answer. Useful for checking that perfect play scores the
/// maximum.
#[derive(Debug, Default)]
pub struct OracleGuesser {
    answers: HashMap<Uuid, (Coordinates, i32)>,
}

impl OracleGuesser {
    pub fn new(events: &[HistoricalEvent]) -> Self {
        Self {
            answers: events
                .iter()
                .map(|event| (event.id, (event.location(), event.year())))
                .collect(),
        }
    }
}

impl Guesser for OracleGuesser {
    fn select_action(&mut self, prompt: &RoundPrompt, permitted_actions: &[Action]) -> Action {
        let Some(&(location, year)) = self.answers.get(&prompt.event_id) else {
            log::warn!("Oracle has no answer for event {}", prompt.event_id);
            return if permitted_actions.contains(&Action::Submit) {
                Action::Submit
            } else {
                Action::PlaceMarker {
                    location: Coordinates::new(0.0, 0.0),
                }
            };
        };

        if prompt.current_guess.location != Some(location) {
            return Action::PlaceMarker { location };
        }
        if prompt.current_guess.year != Some(year) {
            return Action::SetYear { year };
        }
        Action::Submit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::{Guess, HintKind, HintState, YearBounds};

    fn prompt(event: &HistoricalEvent, guess: Guess) -> RoundPrompt {
        RoundPrompt {
            round: 1,
            total_rounds: 1,
            event_id: event.id,
            description: event.description.clone(),
            image_url: None,
            current_guess: guess,
            hints: HintState::default(),
            hints_enabled: true,
            year_bounds: YearBounds::default(),
            timer_remaining: None,
        }
    }

    fn event() -> HistoricalEvent {
        HistoricalEvent::new(
            "Berlin Wall falls",
            NaiveDate::from_ymd_opt(1989, 11, 9).unwrap(),
            Coordinates::new(52.5163, 13.3777),
            "Berlin",
        )
    }

    #[test]
    fn oracle_walks_to_the_answer() {
        let event = event();
        let mut oracle = OracleGuesser::new(std::slice::from_ref(&event));

        let first = oracle.select_action(&prompt(&event, Guess::default()), &[]);
        assert_eq!(
            first,
            Action::PlaceMarker {
                location: event.location()
            }
        );

        let placed = Guess {
            location: Some(event.location()),
            year: None,
        };
        let second = oracle.select_action(&prompt(&event, placed), &[Action::Submit]);
        assert_eq!(second, Action::SetYear { year: 1989 });

        let done = Guess::new(event.location(), 1989);
        assert_eq!(
            oracle.select_action(&prompt(&event, done), &[Action::Submit]),
            Action::Submit
        );
    }

    #[test]
    fn random_guesses_stay_in_bounds() {
        let event = event();
        let mut guesser = RandomGuesser::with_seed(7);
        for _ in 0..100 {
            match guesser.select_action(&prompt(&event, Guess::default()), &[]) {
                Action::PlaceMarker { location } => assert!(location.is_valid()),
                other => panic!("expected a marker first, got {other}"),
            }
            let placed = Guess {
                location: Some(Coordinates::new(0.0, 0.0)),
                year: None,
            };
            match guesser.select_action(&prompt(&event, placed), &[Action::Submit]) {
                Action::SetYear { year } => assert!(YearBounds::default().contains(year)),
                other => panic!("expected a year, got {other}"),
            }
        }
    }

    #[test]
    fn random_guesser_eventually_submits() {
        let event = event();
        let mut guesser = RandomGuesser::with_seed(1);
        let done = Guess::new(Coordinates::new(0.0, 0.0), 1900);
        let permitted = [
            Action::UseHint {
                kind: HintKind::Time,
            },
            Action::Submit,
        ];
        let actions: Vec<_> = (0..50)
            .map(|_| guesser.select_action(&prompt(&event, done), &permitted))
            .collect();
        assert!(actions.contains(&Action::Submit));
        assert!(actions.iter().all(|a| permitted.contains(a)));
    }
}
