use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::db::NewCandidate;

/// Candidate details as submitted by an admin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CandidateSpec {
    pub name: String,
    pub party: String,
    pub description: String,
}

impl TryFrom<CandidateSpec> for NewCandidate {
    type Error = Error;

    /// Every field must be filled in.
    fn try_from(spec: CandidateSpec) -> Result<Self, Self::Error> {
        let missing = [
            ("name", &spec.name),
            ("party", &spec.party),
            ("description", &spec.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "Please fill in all candidate details (missing: {})",
                missing.join(", ")
            )));
        }
        Ok(Self {
            name: spec.name,
            party: spec.party,
            description: spec.description,
        })
    }
}

/// An election reset only happens when explicitly confirmed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateSpec {
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
    use super::*;

    #[test]
    fn complete_spec_converts() {
        let candidate = NewCandidate::try_from(CandidateSpec::example()).unwrap();
        assert_eq!(candidate, NewCandidate::example());
    }

    #[test]
    fn blank_fields_rejected() {
        let spec = CandidateSpec {
            party: "  ".to_string(),
            description: String::new(),
            ..CandidateSpec::example()
        };
        match NewCandidate::try_from(spec) {
            Err(Error::Validation(msg)) => assert!(msg.contains("party, description")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
