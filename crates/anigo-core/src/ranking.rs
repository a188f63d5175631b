//! Preferred-quality ranking of resolved streams
//!
//! This is a stable partition, not a quality comparator: streams matching
//! the preferred token move to the front and everything else keeps its
//! relative order behind them.

use crate::preferences::PreferredQuality;
use crate::types::StreamCandidate;

/// Moves candidates whose quality text contains `preferred`
/// (case-insensitive) in front of all others, preserving relative order
/// within both groups.
pub fn rank(candidates: Vec<StreamCandidate>, preferred: &str) -> Vec<StreamCandidate> {
    let needle = preferred.to_lowercase();
    let (mut matching, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| c.quality.to_lowercase().contains(&needle));
    matching.extend(rest);
    matching
}

/// Ranks candidates by the user's preferred quality
pub fn sort_by_preference(
    candidates: Vec<StreamCandidate>,
    preference: PreferredQuality,
) -> Vec<StreamCandidate> {
    rank(candidates, preference.value())
}
