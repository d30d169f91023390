//! Read-only views derived from the stored election.

use crate::error::Result;
use crate::model::{
    api::results::{ResultsView, Standing},
    db::{Candidate, Candidates, VoteTally, VotedUsers},
    storage::{KeyValueStore, TypedStore},
};

use super::Election;

/// Sum of every tally entry.
pub fn total_votes(tally: &VoteTally) -> u64 {
    tally.total()
}

/// Number of users who have voted.
pub fn turnout(voted: &VotedUsers) -> usize {
    voted.len()
}

/// Share of all votes held by the candidate, from 0 to 100. Zero while no votes exist.
pub fn percentage(tally: &VoteTally, candidate_id: &str) -> f64 {
    let total = tally.total();
    if total == 0 {
        return 0.0;
    }
    100.0 * tally.votes_for(candidate_id) as f64 / total as f64
}

/// Candidates with their votes, most votes first. Ties keep list order.
pub fn ranking<'c>(candidates: &'c Candidates, tally: &VoteTally) -> Vec<(&'c Candidate, u64)> {
    let mut ranked = candidates
        .iter()
        .map(|c| (c, tally.votes_for(&c.id)))
        .collect::<Vec<_>>();
    // `sort_by` is stable.
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Assemble the results dashboard.
pub fn results_view(candidates: &Candidates, tally: &VoteTally, voted: &VotedUsers) -> ResultsView {
    let standings = ranking(candidates, tally)
        .into_iter()
        .enumerate()
        .map(|(i, (candidate, votes))| Standing {
            rank: i + 1,
            candidate: candidate.clone(),
            votes,
            percentage: round_to_tenth(percentage(tally, &candidate.id)),
        })
        .collect();
    ResultsView {
        total_votes: total_votes(tally),
        turnout: turnout(voted),
        total_candidates: candidates.len(),
        standings,
    }
}

impl<'s, S: KeyValueStore + ?Sized> Election<'s, S> {
    /// The results dashboard, visible to any signed-in user.
    pub fn results(&self) -> Result<ResultsView> {
        self.signed_in()?;
        let candidates: Candidates = self.store.load()?;
        let tally: VoteTally = self.store.load()?;
        let voted: VotedUsers = self.store.load()?;
        Ok(results_view(&candidates, &tally, &voted))
    }
}

#[cfg(test)]
mod tests {
    use crate::election::test_support::*;
    use crate::error::Error;
    use crate::model::db::NewCandidate;

    use super::*;

    fn candidates() -> Candidates {
        let mut candidates = Candidates::defaults();
        candidates.push(NewCandidate::example());
        candidates
    }

    #[test]
    fn percentages_zero_without_votes() {
        let tally = VoteTally::default();
        for candidate in candidates().iter() {
            assert_eq!(percentage(&tally, &candidate.id), 0.0);
        }
        let view = results_view(&candidates(), &tally, &VotedUsers::default());
        assert_eq!(view.total_votes, 0);
        assert!(view.standings.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let tally = VoteTally::from([("1", 1), ("2", 1), ("3", 1)]);
        let sum: f64 = candidates()
            .iter()
            .map(|c| percentage(&tally, &c.id))
            .sum();
        assert!((sum - 100.0).abs() < 1e-9);

        let view = results_view(&candidates(), &tally, &VotedUsers::default());
        let rounded: f64 = view.standings.iter().map(|s| s.percentage).sum();
        assert!((rounded - 100.0).abs() <= 0.1 * view.standings.len() as f64);
        assert_eq!(view.standings[0].percentage, 33.3);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let candidates = candidates();
        let fourth = candidates.iter().last().unwrap().id.clone();
        let tally = VoteTally::from([("1", 2), ("3", 5), (fourth.as_str(), 2)]);

        let order = ranking(&candidates, &tally)
            .into_iter()
            .map(|(c, votes)| (c.id.as_str(), votes))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            [("3", 5), ("1", 2), (fourth.as_str(), 2), ("2", 0)]
        );
    }

    #[test]
    fn orphaned_votes_count_toward_total_only() {
        let candidates = Candidates::defaults();
        let tally = VoteTally::from([("1", 1), ("gone", 3)]);
        let view = results_view(&candidates, &tally, &VotedUsers::default());

        assert_eq!(view.total_votes, 4);
        assert_eq!(view.total_candidates, 3);
        assert!(view.standings.iter().all(|s| s.candidate.id != "gone"));
        assert_eq!(view.standings[0].percentage, 25.0);
    }

    #[test]
    fn removed_candidate_never_ranked() {
        let mut store = populated_store();
        store.save(&Candidates::defaults()).unwrap();
        login_voter(&mut store);
        election(&mut store).cast_vote("3").unwrap();
        login_admin(&mut store);
        election(&mut store).remove_candidate("3").unwrap();

        let view = election(&mut store).results().unwrap();
        assert_eq!(view.total_votes, 0);
        assert_eq!(view.turnout, 1);
        assert!(view.standings.iter().all(|s| s.candidate.id != "3"));
        assert_eq!(
            view.standings.iter().map(|s| s.rank).collect::<Vec<_>>(),
            [1, 2]
        );
    }

    #[test]
    fn results_require_sign_in() {
        let mut store = populated_store();
        assert!(matches!(
            election(&mut store).results(),
            Err(Error::Unauthorized(_))
        ));
    }
}
