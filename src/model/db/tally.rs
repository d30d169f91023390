use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{common::CandidateId, storage::StoredValue};

/// Per-candidate vote counts. Counts are unsigned, so a stored negative
/// count fails to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally(BTreeMap<CandidateId, u64>);

impl VoteTally {
    /// Votes counted for the given candidate; zero if it has no entry.
    pub fn votes_for(&self, id: &str) -> u64 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Count one more vote for the given candidate.
    pub fn increment(&mut self, id: &str) {
        *self.0.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Drop the entry for the given candidate.
    pub fn remove(&mut self, id: &str) -> Option<u64> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Sum of every entry, including entries for candidates that no longer exist.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, u64); N]> for VoteTally {
    fn from(entries: [(&str, u64); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(id, count)| (id.to_string(), count))
                .collect(),
        )
    }
}

impl StoredValue for VoteTally {
    const KEY: &'static str = "votes";

    fn absent() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn increment_creates_then_adds() {
        let mut tally = VoteTally::default();
        assert_eq!(tally.votes_for("2"), 0);
        tally.increment("2");
        tally.increment("2");
        tally.increment("1");
        assert_eq!(tally, VoteTally::from([("1", 1), ("2", 2)]));
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn negative_counts_rejected() {
        assert!(serde_json::from_str::<VoteTally>(r#"{"1": -1}"#).is_err());
        assert!(serde_json::from_str::<VoteTally>(r#"{"1": "3"}"#).is_err());
        assert_eq!(
            serde_json::from_str::<VoteTally>(r#"{"1": 3}"#).unwrap(),
            VoteTally::from([("1", 3)])
        );
    }
}
