use serde::{Deserialize, Serialize};

use crate::model::{
    common::{CandidateId, Username},
    db::Candidate,
};

/// A voter's choice.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub candidate_id: CandidateId,
}

/// What a voter sees when opening the ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotView {
    pub username: Username,
    pub candidates: Vec<Candidate>,
    pub has_voted: bool,
    pub total_votes: u64,
}
