use std::io::{self, Write};

use itertools::Itertools;
use regex::{Captures, Regex};
use types::{parse_year_input, Action, Coordinates, Guesser, HintKind, RoundPrompt};

/// Reads actions from stdin. Markers and years are free-form; hints and
/// submitting must be among the permitted actions.
#[derive(Debug, Default)]
pub struct InputGuesser {}

impl Guesser for InputGuesser {
    fn select_action(&mut self, prompt: &RoundPrompt, permitted_actions: &[Action]) -> Action {
        println!("{prompt}");
        println!(
            "Commands: marker <lat> <lon> || year <year, e.g. 1969 or 44 BC>{}",
            permitted_actions
                .iter()
                .map(|action| format!(" || {action}"))
                .join("")
        );

        let mut buf = String::new();
        loop {
            match select_action_from_stdin(&mut buf, prompt, permitted_actions) {
                Ok(action) => return action,
                Err(err) => {
                    buf.clear();
                    log::error!("Error parsing message from stdin: {err}")
                }
            }
        }
    }
}

fn select_action_from_stdin(
    buf: &mut String,
    prompt: &RoundPrompt,
    actions: &[Action],
) -> Result<Action, String> {
    print!("Your move? >> ");
    let _ = io::stdout().flush();
    match io::stdin().read_line(buf) {
        Ok(0) => {
            log::warn!("stdin closed, submitting whatever has been placed");
            Ok(closed_input_action(actions))
        }
        Ok(_) => select_action_from_str(buf, prompt, actions),
        Err(err) => {
            buf.clear();
            Err(format!("Error reading line from stdin: {err}"))
        }
    }
}

pub(crate) fn select_action_from_str(
    input: &str,
    prompt: &RoundPrompt,
    actions: &[Action],
) -> Result<Action, String> {
    let input = input.trim().to_lowercase();
    let input = input.as_str();

    if let Some(marker_result) = get_action_from_regex(
        input,
        prompt,
        actions,
        Regex::new(r"^m(?:arker)?\s+(?<lat>-?[\d.]+)[,\s]\s*(?<lon>-?[\d.]+)$")
            .expect("Valid marker regex"),
        marker_action_from_captures,
    ) {
        return marker_result;
    }

    if let Some(year_result) = get_action_from_regex(
        input,
        prompt,
        actions,
        Regex::new(r"^y(?:ear)?\s+(?<year>.+)$").expect("Valid year regex"),
        year_action_from_captures,
    ) {
        return year_result;
    }

    if let Some(hint_result) = get_action_from_regex(
        input,
        prompt,
        actions,
        Regex::new(r"^h(?:int)?\s+(?<kind>time|location|t|l)$").expect("Valid hint regex"),
        hint_action_from_captures,
    ) {
        return hint_result;
    }

    if let Some(submit_result) = get_action_from_regex(
        input,
        prompt,
        actions,
        Regex::new(r"^s(?:ubmit)?$").expect("Valid submit regex"),
        submit_action_from_captures,
    ) {
        return submit_result;
    }

    Err(format!(
        "Unable to parse a marker, year, hint, or submit command from string: {input}"
    ))
}

fn closed_input_action(actions: &[Action]) -> Action {
    if actions.contains(&Action::Submit) {
        Action::Submit
    } else {
        Action::PlaceMarker {
            location: Coordinates::new(0.0, 0.0),
        }
    }
}

type CaptureCallback =
    for<'a, 'b, 'c, 'd> fn(&'a Captures<'b>, &'c RoundPrompt, &'d [Action]) -> Result<Action, String>;

fn get_action_from_regex(
    input: &str,
    prompt: &RoundPrompt,
    actions: &[Action],
    re: Regex,
    callback: CaptureCallback,
) -> Option<Result<Action, String>> {
    let caps = re.captures(input)?;
    Some(callback(&caps, prompt, actions))
}

fn marker_action_from_captures(
    caps: &Captures,
    _prompt: &RoundPrompt,
    _actions: &[Action],
) -> Result<Action, String> {
    let parse = |name: &str| {
        let raw = caps
            .name(name)
            .expect("Marker match always has both coordinates")
            .as_str();
        raw.parse::<f64>()
            .map_err(|err| format!("Unable to parse coordinate {raw:?}: {err}"))
    };
    let location = Coordinates::new(parse("lat")?, parse("lon")?);
    if !location.is_valid() {
        return Err(format!("Coordinates out of range: {location}"));
    }
    Ok(Action::PlaceMarker { location })
}

fn year_action_from_captures(
    caps: &Captures,
    prompt: &RoundPrompt,
    _actions: &[Action],
) -> Result<Action, String> {
    let text = caps
        .name("year")
        .expect("Year match always has a year")
        .as_str();
    let previous = prompt
        .current_guess
        .year
        .unwrap_or_else(|| prompt.year_bounds.midpoint());
    let year = parse_year_input(text, previous, &prompt.year_bounds);
    log::debug!("Year input {text:?} read as {year}");
    Ok(Action::SetYear { year })
}

fn hint_action_from_captures(
    caps: &Captures,
    _prompt: &RoundPrompt,
    actions: &[Action],
) -> Result<Action, String> {
    let kind = match caps.name("kind").expect("Hint match always has a kind").as_str() {
        "time" | "t" => HintKind::Time,
        _ => HintKind::Location,
    };
    let action = Action::UseHint { kind };
    if actions.contains(&action) {
        Ok(action)
    } else {
        Err(format!("The {kind} hint is not available right now"))
    }
}

fn submit_action_from_captures(
    _caps: &Captures,
    _prompt: &RoundPrompt,
    actions: &[Action],
) -> Result<Action, String> {
    if actions.contains(&Action::Submit) {
        Ok(Action::Submit)
    } else {
        Err("Place a marker on the map before submitting".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Guess, HintState, YearBounds};
    use uuid::Uuid;

    fn prompt(year: Option<i32>) -> RoundPrompt {
        RoundPrompt {
            round: 1,
            total_rounds: 5,
            event_id: Uuid::new_v4(),
            description: "Something happened".to_string(),
            image_url: None,
            current_guess: Guess {
                location: None,
                year,
            },
            hints: HintState::default(),
            hints_enabled: true,
            year_bounds: YearBounds::default(),
            timer_remaining: None,
        }
    }

    #[test]
    fn parses_marker() {
        let action = select_action_from_str("marker 48.85 2.35\n", &prompt(None), &[]).unwrap();
        assert_eq!(
            action,
            Action::PlaceMarker {
                location: Coordinates::new(48.85, 2.35)
            }
        );
        let action = select_action_from_str("M -33.9, 151.2", &prompt(None), &[]).unwrap();
        assert_eq!(
            action,
            Action::PlaceMarker {
                location: Coordinates::new(-33.9, 151.2)
            }
        );
    }

    #[test]
    fn rejects_out_of_range_marker() {
        assert!(select_action_from_str("m 91 0", &prompt(None), &[]).is_err());
        assert!(select_action_from_str("m 1.2.3 0", &prompt(None), &[]).is_err());
    }

    #[test]
    fn parses_year_with_clamp_and_fallback() {
        let p = prompt(Some(1950));
        assert_eq!(
            select_action_from_str("year 1969", &p, &[]).unwrap(),
            Action::SetYear { year: 1969 }
        );
        assert_eq!(
            select_action_from_str("y 3000", &p, &[]).unwrap(),
            Action::SetYear { year: 2024 }
        );
        assert_eq!(
            select_action_from_str("y soon", &p, &[]).unwrap(),
            Action::SetYear { year: 1950 }
        );
        assert_eq!(
            select_action_from_str("y soon", &prompt(None), &[]).unwrap(),
            Action::SetYear {
                year: YearBounds::default().midpoint()
            }
        );
    }

    #[test]
    fn hints_and_submit_must_be_permitted() {
        let permitted = [Action::UseHint {
            kind: HintKind::Location,
        }];
        assert_eq!(
            select_action_from_str("hint l", &prompt(None), &permitted).unwrap(),
            Action::UseHint {
                kind: HintKind::Location
            }
        );
        assert!(select_action_from_str("hint time", &prompt(None), &permitted).is_err());
        assert!(select_action_from_str("submit", &prompt(None), &permitted).is_err());
        assert_eq!(
            select_action_from_str("s", &prompt(None), &[Action::Submit]).unwrap(),
            Action::Submit
        );
    }

    #[test]
    fn closed_input_still_ends_the_round() {
        assert_eq!(
            closed_input_action(&[]),
            Action::PlaceMarker {
                location: Coordinates::new(0.0, 0.0)
            }
        );
        assert_eq!(closed_input_action(&[Action::Submit]), Action::Submit);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(select_action_from_str("dance", &prompt(None), &[Action::Submit]).is_err());
    }
}
