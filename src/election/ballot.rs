use crate::error::{Error, Result};
use crate::model::{
    api::ballot::BallotView,
    common::Role,
    db::{Candidates, VoteTally, VotedUsers},
    storage::{Batch, KeyValueStore, TypedStore},
};

use super::Election;

impl<'s, S: KeyValueStore + ?Sized> Election<'s, S> {
    /// The current candidate list.
    pub fn candidates(&self) -> Result<Candidates> {
        Ok(self.store.load()?)
    }

    /// The stored candidate list, or the defaults if it is empty and seeding is
    /// enabled. The flag tells whether the defaults still need saving.
    fn seeded_candidates(&self) -> Result<(Candidates, bool)> {
        let candidates: Candidates = self.store.load()?;
        if !candidates.is_empty() || !self.rules.seed_default_candidates {
            return Ok((candidates, false));
        }
        Ok((Candidates::defaults(), true))
    }

    /// The candidate list, seeding the defaults first if it is empty and seeding is enabled.
    pub fn candidates_or_defaults(&mut self) -> Result<Candidates> {
        let (candidates, seeded) = self.seeded_candidates()?;
        if seeded {
            self.store.save(&candidates)?;
            info!("Seeded {} default candidates", candidates.len());
        }
        Ok(candidates)
    }

    /// Open the ballot for the signed-in voter.
    pub fn ballot(&mut self) -> Result<BallotView> {
        let voter = self.acting_as(Role::Voter)?;
        let candidates = self.candidates_or_defaults()?;
        let voted: VotedUsers = self.store.load()?;
        let tally: VoteTally = self.store.load()?;
        Ok(BallotView {
            has_voted: voted.contains(&voter.username),
            username: voter.username,
            candidates: candidates.iter().cloned().collect(),
            total_votes: tally.total(),
        })
    }

    /// Cast the signed-in voter's one vote.
    ///
    /// The tally and the ballot tracker are written together, so a vote is
    /// never counted without the voter being marked as having voted. An empty
    /// ballot is seeded in the same write, as opening it would have done.
    pub fn cast_vote(&mut self, candidate_id: &str) -> Result<()> {
        let voter = self.acting_as(Role::Voter)?;

        let mut voted: VotedUsers = self.store.load()?;
        if voted.contains(&voter.username) {
            return Err(Error::AlreadyVoted(voter.username));
        }

        let (candidates, seeded) = self.seeded_candidates()?;
        if !candidates.contains(candidate_id) {
            return Err(Error::not_found(format!("Candidate {candidate_id}")));
        }

        let mut tally: VoteTally = self.store.load()?;
        tally.increment(candidate_id);
        voted.insert(&voter.username);

        let mut batch = Batch::new();
        if seeded {
            batch.save(&candidates)?;
        }
        batch.save(&tally)?.save(&voted)?;
        self.store.commit(batch)?;

        info!("{} voted", voter.username);
        Ok(())
    }
}
