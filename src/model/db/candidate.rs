use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use data_encoding::HEXLOWER;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{common::CandidateId, storage::StoredValue};

/// Core candidate data, as entered by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCore {
    pub name: String,
    pub party: String,
    pub description: String,
}

/// A candidate without an ID.
pub type NewCandidate = CandidateCore;

/// A candidate from the store, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(flatten)]
    pub candidate: CandidateCore,
}

impl Deref for Candidate {
    type Target = CandidateCore;

    fn deref(&self) -> &Self::Target {
        &self.candidate
    }
}

impl DerefMut for Candidate {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.candidate
    }
}

/// The ordered candidate list. IDs are unique; a stored list with repeated
/// IDs is rejected when read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Candidate>", into = "Vec<Candidate>")]
pub struct Candidates(Vec<Candidate>);

impl Candidates {
    /// The three candidates seeded into an empty election.
    pub fn defaults() -> Self {
        let seed = |id: &str, name: &str, party: &str, description: &str| Candidate {
            id: id.to_string(),
            candidate: CandidateCore {
                name: name.to_string(),
                party: party.to_string(),
                description: description.to_string(),
            },
        };
        Self(vec![
            seed(
                "1",
                "Sarah Johnson",
                "Progressive Party",
                "Advocating for education reform and environmental protection with 15 years of public service experience.",
            ),
            seed(
                "2",
                "Michael Chen",
                "Economic Alliance",
                "Focused on job creation and economic growth through innovation and small business support.",
            ),
            seed(
                "3",
                "Elena Rodriguez",
                "Community First",
                "Committed to healthcare accessibility and infrastructure development for all communities.",
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.0.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.0.iter()
    }

    /// Generate an ID not used by any current candidate.
    pub fn fresh_id(&self) -> CandidateId {
        let mut rng = rand::thread_rng();
        loop {
            let id = HEXLOWER.encode(&rng.gen::<[u8; 8]>());
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Append a new candidate under a fresh ID, returning the stored candidate.
    pub fn push(&mut self, candidate: NewCandidate) -> Candidate {
        let candidate = Candidate {
            id: self.fresh_id(),
            candidate,
        };
        self.0.push(candidate.clone());
        candidate
    }

    /// Remove the candidate with the given ID, if present.
    pub fn remove(&mut self, id: &str) -> Option<Candidate> {
        let index = self.0.iter().position(|c| c.id == id)?;
        Some(self.0.remove(index))
    }
}

impl TryFrom<Vec<Candidate>> for Candidates {
    type Error = String;

    fn try_from(candidates: Vec<Candidate>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            if !seen.insert(candidate.id.as_str()) {
                return Err(format!("duplicate candidate ID {}", candidate.id));
            }
        }
        Ok(Self(candidates))
    }
}

impl From<Candidates> for Vec<Candidate> {
    fn from(candidates: Candidates) -> Self {
        candidates.0
    }
}

impl StoredValue for Candidates {
    const KEY: &'static str = "candidates";

    fn absent() -> Self {
        Self::default()
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl NewCandidate {
        pub fn example() -> Self {
            Self {
                name: "X".to_string(),
                party: "P".to_string(),
                description: "d".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn defaults_have_fixed_ids() {
        let defaults = Candidates::defaults();
        let ids: Vec<_> = defaults.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(defaults.get("2").unwrap().name, "Michael Chen");
    }

    #[test]
    fn push_and_remove() {
        let mut candidates = Candidates::defaults();
        let added = candidates.push(NewCandidate::example());
        assert_eq!(added.id.len(), 16);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates.iter().last(), Some(&added));

        assert_eq!(candidates.remove(&added.id), Some(added));
        assert_eq!(candidates.remove("does-not-exist"), None);
        assert_eq!(candidates, Candidates::defaults());
    }

    #[test]
    fn stored_layout_is_flat() {
        let json = serde_json::to_value(Candidates::defaults()).unwrap();
        assert_eq!(json[0]["id"], "1");
        assert_eq!(json[0]["name"], "Sarah Johnson");
        assert_eq!(json[0]["party"], "Progressive Party");
    }

    #[test]
    fn duplicate_ids_rejected_on_read() {
        let raw = r#"[
            {"id": "1", "name": "A", "party": "P", "description": "d"},
            {"id": "1", "name": "B", "party": "Q", "description": "e"}
        ]"#;
        assert!(serde_json::from_str::<Candidates>(raw).is_err());
    }
}
