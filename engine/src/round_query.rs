//! The current round mirrored into the page's query string, so a reload
//! lands back on the same round.

const ROUND_KEY: &str = "round";

pub struct RoundQuery;

impl RoundQuery {
    /// Reads `round` from a query string such as `?round=3&lang=en`.
    /// Missing, zero or non-numeric values yield `None`.
    pub fn parse(query: &str) -> Option<u32> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == ROUND_KEY)
            .and_then(|(_, value)| value.parse::<u32>().ok())
            .filter(|&round| round >= 1)
    }

    pub fn to_query(round: u32) -> String {
        format!("{ROUND_KEY}={round}")
    }

    /// Returning home drops the round from the URL.
    pub fn cleared() -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_round_among_other_params() {
        assert_eq!(RoundQuery::parse("?round=3"), Some(3));
        assert_eq!(RoundQuery::parse("lang=en&round=2&x=1"), Some(2));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(RoundQuery::parse(""), None);
        assert_eq!(RoundQuery::parse("?round="), None);
        assert_eq!(RoundQuery::parse("?round=0"), None);
        assert_eq!(RoundQuery::parse("?round=-1"), None);
        assert_eq!(RoundQuery::parse("?rounds=4"), None);
    }

    #[test]
    fn writes_and_clears() {
        assert_eq!(RoundQuery::to_query(4), "round=4");
        assert_eq!(RoundQuery::parse(&RoundQuery::to_query(4)), Some(4));
        assert_eq!(RoundQuery::cleared(), "");
    }
}
