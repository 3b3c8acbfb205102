// Ranking of scored voicings.
//
// Dedupe by exact fret pattern (the first enumerated occurrence wins), then
// stable-sort ascending by total cost so that equally-cheap voicings keep
// their enumeration order, then truncate to the result cap.

use crate::scoring::ScoredVoicing;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Dedupe, sort and cap a scored voicing list, best first.
pub fn rank_voicings(mut voicings: Vec<ScoredVoicing>, max_results: usize) -> Vec<ScoredVoicing> {
    let mut seen = HashSet::new();
    voicings.retain(|scored| seen.insert(scored.voicing.pattern()));
    // Costs are finite by construction; treat the impossible NaN as equal.
    voicings.sort_by(|a, b| {
        a.breakdown
            .total_cost
            .partial_cmp(&b.breakdown.total_cost)
            .unwrap_or(Ordering::Equal)
    });
    voicings.truncate(max_results);
    voicings
}
