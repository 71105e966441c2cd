//! Marker-word tally: counts keyword mentions across every utterance.

use std::collections::BTreeMap;

/// Markers counted when none are configured.
pub const DEFAULT_MARKERS: [&str; 2] = ["ahorro", "energia"];

/// Snapshot of marker counts, keyed by marker.
pub type TallySnapshot = BTreeMap<String, u64>;

/// Running counters for a fixed set of marker substrings.
///
/// Each whitespace-delimited token counts once per marker it contains,
/// compared case-insensitively. Counts only ever grow until `reset`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTally {
    counts: BTreeMap<String, u64>,
}

impl MarkerTally {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let counts = markers
            .into_iter()
            .map(|m| (m.as_ref().to_lowercase(), 0))
            .filter(|(m, _)| !m.is_empty())
            .collect();
        Self { counts }
    }

    /// Scan one utterance and bump the matching counters.
    pub fn observe(&mut self, utterance: &str) {
        let lowered = utterance.to_lowercase();
        for token in lowered.split_whitespace() {
            for (marker, count) in self.counts.iter_mut() {
                if token.contains(marker.as_str()) {
                    *count += 1;
                }
            }
        }
    }

    pub fn count(&self, marker: &str) -> u64 {
        self.counts
            .get(&marker.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.counts.clone()
    }

    /// Zero every counter, keeping the marker set.
    pub fn reset(&mut self) {
        self.counts.values_mut().for_each(|c| *c = 0);
    }
}

impl Default for MarkerTally {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_substring_matches_case_insensitively() {
        let mut tally = MarkerTally::default();
        tally.observe("I want ahorro now");
        tally.observe("ENERGIA saves Ahorro");
        assert_eq!(tally.count("ahorro"), 2);
        assert_eq!(tally.count("energia"), 1);
    }

    #[test]
    fn token_containing_marker_counts_once() {
        let mut tally = MarkerTally::default();
        tally.observe("superahorro ahorros ahorroahorro");
        assert_eq!(tally.count("ahorro"), 3);
    }

    #[test]
    fn token_may_match_several_markers() {
        let mut tally = MarkerTally::default();
        tally.observe("energia-ahorro");
        assert_eq!(tally.count("ahorro"), 1);
        assert_eq!(tally.count("energia"), 1);
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn accented_form_is_a_different_word() {
        let mut tally = MarkerTally::default();
        tally.observe("energía");
        assert_eq!(tally.count("energia"), 0);
    }

    #[test]
    fn counts_are_monotonic_until_reset() {
        let mut tally = MarkerTally::default();
        let utterances = ["ahorro", "nothing here", "", "energia energia", "ahorro"];
        let mut last = 0;
        for u in utterances {
            tally.observe(u);
            assert!(tally.total() >= last);
            last = tally.total();
        }
        assert_eq!(tally.count("ahorro"), 2);
        assert_eq!(tally.count("energia"), 2);

        tally.reset();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.snapshot().len(), 2);
    }

    #[test]
    fn custom_markers_are_lowercased() {
        let mut tally = MarkerTally::new(["Solar", ""]);
        tally.observe("solar SOLAR panel");
        assert_eq!(tally.snapshot(), TallySnapshot::from([("solar".to_string(), 2)]));
    }
}
