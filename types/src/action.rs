use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Coordinates, HintKind};

/// Something a player can do during a round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    PlaceMarker { location: Coordinates },
    SetYear { year: i32 },
    UseHint { kind: HintKind },
    Submit,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlaceMarker { location } => write!(f, "Place marker at {location}"),
            Action::SetYear { year } => write!(f, "Set year to {year}"),
            Action::UseHint { kind } => write!(f, "Use {kind} hint"),
            Action::Submit => write!(f, "Submit guess"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Action::Submit.to_string(), "Submit guess");
        assert_eq!(
            Action::UseHint {
                kind: HintKind::Location
            }
            .to_string(),
            "Use location hint"
        );
        assert_eq!(Action::SetYear { year: 1889 }.to_string(), "Set year to 1889");
    }
}
