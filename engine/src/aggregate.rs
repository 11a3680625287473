use types::{RoundResult, Summary};

use crate::scoring::ScoringRules;

/// Folds per-round results into session totals. Totals do not depend on
/// the order of `results`.
pub fn aggregate(results: &[RoundResult], rules: &ScoringRules) -> Summary {
    results
        .iter()
        .fold(Summary::default(), |mut summary, result| {
            summary.rounds += 1;
            summary.total_score += result.total_score;
            summary.max_possible_score += rules.max_round_score();
            summary.perfect_locations += result.achievements.perfect_location as u32;
            summary.perfect_years += result.achievements.perfect_time as u32;
            summary.perfect_scores += result.achievements.perfect as u32;
            summary.hints_used_count += result.hints_used.count();
            summary
        })
}
