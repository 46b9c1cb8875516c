//! Ranking and presentation of search results.

use serde::{Deserialize, Serialize};

use qff_compile::CompilationStats;
use qff_hal::Counts;

use crate::driver::SearchOutcome;

/// Number of states shown by default.
pub const DEFAULT_TOP_K: usize = 10;

/// One ranked measurement outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCount {
    /// Measured bitstring, qubit 0 rightmost.
    pub state: String,
    /// Number of shots that produced it.
    pub count: u64,
    /// `count / total_shots`.
    pub probability: f64,
}

impl StateCount {
    /// Probability with four decimals.
    pub fn formatted_probability(&self) -> String {
        format!("{:.4}", self.probability)
    }
}

/// The `k` most frequent outcomes.
///
/// Sorted by count descending with ties broken by bitstring ascending, so
/// the result is deterministic. Never longer than `k` or than the number of
/// distinct outcomes.
pub fn top_k(counts: &Counts, k: usize) -> Vec<StateCount> {
    let total = counts.total_shots();
    counts
        .sorted()
        .into_iter()
        .take(k)
        .map(|(state, &count)| StateCount {
            state: state.clone(),
            count,
            probability: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect()
}

/// Presentation-ready summary of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Friend display name.
    pub friend: String,
    /// The friend's phone number for this run.
    pub phone: String,
    /// Target index as ten binary digits.
    pub target_bin: String,
    /// Most frequent outcomes.
    pub top: Vec<StateCount>,
    /// Shots actually counted.
    pub total_shots: u64,
    /// Grover iterations used.
    pub iterations: u32,
    /// Whether the most frequent outcome is the target.
    pub found: bool,
    /// Transpiler statistics.
    pub stats: CompilationStats,
    /// Compile plus execution time.
    pub elapsed_ms: u64,
}

impl SearchReport {
    /// Summarize `outcome`, keeping the `k` most frequent states.
    pub fn from_outcome(outcome: &SearchOutcome, k: usize) -> Self {
        let top = top_k(&outcome.counts, k);
        let target_bin = outcome.target.to_bitstring();
        let found = top.first().is_some_and(|s| s.state == target_bin);

        Self {
            friend: outcome.friend.name.clone(),
            phone: outcome.friend.phone.clone(),
            target_bin,
            top,
            total_shots: outcome.counts.total_shots(),
            iterations: outcome.iterations,
            found,
            stats: outcome.stats.clone(),
            elapsed_ms: outcome.elapsed.as_millis() as u64,
        }
    }

    /// Lines of the form ``State `0000000101` → 0.1563``.
    pub fn probability_lines(&self) -> Vec<String> {
        self.top
            .iter()
            .map(|s| format!("State `{}` → {}", s.state, s.formatted_probability()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Counts {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn test_top_k_order_and_ties() {
        let c = counts(&[("011", 5), ("001", 9), ("010", 5), ("111", 1)]);
        let top = top_k(&c, 3);

        let states: Vec<_> = top.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(states, ["001", "010", "011"]);
        assert_eq!(top[0].count, 9);
        assert!((top[0].probability - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_top_k_bounded_by_distinct_outcomes() {
        let c = counts(&[("00", 3), ("11", 1)]);
        assert_eq!(top_k(&c, 10).len(), 2);
        assert!(top_k(&Counts::new(), 10).is_empty());
        assert!(top_k(&c, 0).is_empty());
    }

    #[test]
    fn test_formatted_probability() {
        let s = StateCount {
            state: "0000000000".into(),
            count: 161,
            probability: 161.0 / 1024.0,
        };
        assert_eq!(s.formatted_probability(), "0.1572");
    }
}
