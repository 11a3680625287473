use std::sync::OnceLock;

use regex::Regex;

use crate::YearBounds;

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:(?<prefix>ad|ce)\s+)?(?<year>-?\d{1,5})\s*(?<era>bce|bc|ad|ce)?\s*$")
            .expect("year pattern is valid")
    })
}

/// Interprets free-text year input the way the year box does on blur:
/// valid input is clamped into `bounds`, anything unparseable keeps
/// `previous`.
pub fn parse_year_input(text: &str, previous: i32, bounds: &YearBounds) -> i32 {
    let Some(captures) = year_pattern().captures(text) else {
        log::debug!("Ignoring malformed year input {text:?}");
        return bounds.clamp(previous);
    };
    let digits = &captures["year"];
    let has_era = captures.name("prefix").is_some() || captures.name("era").is_some();
    if has_era && digits.starts_with('-') {
        log::debug!("Ignoring year input {text:?} with both a sign and an era");
        return bounds.clamp(previous);
    }
    let Ok(mut year) = digits.parse::<i32>() else {
        return bounds.clamp(previous);
    };
    if captures
        .name("era")
        .is_some_and(|era| era.as_str().to_ascii_lowercase().starts_with("bc"))
    {
        year = -year;
    }
    bounds.clamp(year)
}
