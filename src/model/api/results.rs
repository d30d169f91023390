use serde::{Deserialize, Serialize};

use crate::model::db::Candidate;

/// One candidate's place in the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// 1-based position, leader first.
    pub rank: usize,
    #[serde(flatten)]
    pub candidate: Candidate,
    pub votes: u64,
    /// Share of all votes, rounded to one decimal place.
    pub percentage: f64,
}

/// The election dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub total_votes: u64,
    /// Number of users who have voted.
    pub turnout: usize,
    pub total_candidates: usize,
    pub standings: Vec<Standing>,
}
