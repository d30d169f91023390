use crate::error::{Error, Result};
use crate::model::{
    api::admin::CandidateSpec,
    common::Role,
    db::{Candidate, Candidates, NewCandidate, VoteTally, VotedUsers},
    storage::{Batch, KeyValueStore, TypedStore},
};

use super::Election;

impl<'s, S: KeyValueStore + ?Sized> Election<'s, S> {
    /// Add a candidate under a freshly generated ID.
    pub fn add_candidate(&mut self, spec: CandidateSpec) -> Result<Candidate> {
        let admin = self.acting_as(Role::Admin)?;
        let new_candidate = NewCandidate::try_from(spec)?;

        let mut candidates: Candidates = self.store.load()?;
        let candidate = candidates.push(new_candidate);
        self.store.save(&candidates)?;

        info!(
            "{} added candidate {} ({})",
            admin.username, candidate.id, candidate.name
        );
        Ok(candidate)
    }

    /// Remove a candidate along with their votes. Removing an unknown ID does nothing.
    pub fn remove_candidate(&mut self, id: &str) -> Result<Option<Candidate>> {
        let admin = self.acting_as(Role::Admin)?;

        let mut candidates: Candidates = self.store.load()?;
        let Some(removed) = candidates.remove(id) else {
            debug!("No candidate {id} to remove");
            return Ok(None);
        };
        let mut tally: VoteTally = self.store.load()?;
        tally.remove(id);

        let mut batch = Batch::new();
        batch.save(&candidates)?.save(&tally)?;
        self.store.commit(batch)?;

        info!("{} removed candidate {id}", admin.username);
        Ok(Some(removed))
    }

    /// Clear every vote and the record of who voted. Candidates and users are untouched.
    pub fn reset_election(&mut self, confirmed: bool) -> Result<()> {
        let admin = self.acting_as(Role::Admin)?;
        if !confirmed {
            return Err(Error::validation(
                "Resetting the election removes all votes and voter records; please confirm",
            ));
        }

        let mut batch = Batch::new();
        batch.clear::<VoteTally>().clear::<VotedUsers>();
        self.store.commit(batch)?;

        warn!("{} reset the election", admin.username);
        Ok(())
    }
}
