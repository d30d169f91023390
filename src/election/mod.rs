//! The election state machine.
//!
//! An [`Election`] borrows a store for the duration of one operation and acts
//! on behalf of whoever the stored session says is signed in:
//!
//! ```text
//! Anonymous --signup/login--> Authenticated{role}
//! Authenticated{voter, not voted} --cast_vote--> Authenticated{voter, voted}
//! Authenticated{admin} --add/remove candidate, reset--> Authenticated{admin}
//! Authenticated{_} --logout--> Anonymous
//! ```
//!
//! Every operation either fully succeeds or leaves the store untouched:
//! operations touching several keys go through one [`Batch`](crate::model::storage::Batch).

use crate::error::{Error, Result};
use crate::model::{
    common::Role,
    db::{CurrentUser, Session, User, Users},
    storage::{KeyValueStore, TypedStore},
};

mod admin;
mod ballot;
mod identity;
pub mod results;

/// Behaviour switches for an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectionRules {
    /// Seed the default candidates when a voter opens an empty ballot.
    pub seed_default_candidates: bool,
    /// Refuse to sign in voters who have already voted.
    pub block_voted_login: bool,
}

impl Default for ElectionRules {
    fn default() -> Self {
        Self {
            seed_default_candidates: true,
            block_voted_login: true,
        }
    }
}

/// The election over a particular store.
pub struct Election<'s, S: KeyValueStore + ?Sized> {
    store: &'s mut S,
    rules: ElectionRules,
}

impl<'s, S: KeyValueStore + ?Sized> Election<'s, S> {
    pub fn new(store: &'s mut S, rules: ElectionRules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> ElectionRules {
        self.rules
    }

    /// The restored session, if its user still exists.
    ///
    /// The role is taken from the identity store rather than trusted from the session.
    pub fn current_session(&self) -> Result<Option<Session>> {
        let CurrentUser(session) = self.store.load()?;
        let Some(session) = session else {
            return Ok(None);
        };
        let users: Users = self.store.load()?;
        match users.get(&session.username) {
            Some(User { username, user }) => Ok(Some(Session::new(username, user.role))),
            None => {
                debug!("Ignoring session for unknown user {}", session.username);
                Ok(None)
            }
        }
    }

    /// The signed-in user, whatever their role.
    fn signed_in(&self) -> Result<Session> {
        self.current_session()?
            .ok_or_else(|| Error::unauthorized("Please sign in first"))
    }

    /// The signed-in user, who must hold `role`.
    fn acting_as(&self, role: Role) -> Result<Session> {
        let session = self.signed_in()?;
        if session.role != role {
            return Err(Error::unauthorized(format!(
                "This action requires the {role} role"
            )));
        }
        Ok(session)
    }
}


#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::model::{
        api::auth::SignupRequest,
        storage::{FileStore, MemoryStore},
    };

    use super::test_support::*;
    use super::*;

    #[test]
    fn no_session_by_default() {
        let mut store = MemoryStore::new();
        assert_eq!(election(&mut store).current_session().unwrap(), None);
    }

    #[test]
    fn session_for_missing_user_is_ignored() {
        let mut store = MemoryStore::new();
        store
            .save(&CurrentUser(Some(Session::new("ghost", Role::Admin))))
            .unwrap();
        let election = election(&mut store);
        assert_eq!(election.current_session().unwrap(), None);
        assert!(matches!(election.signed_in(), Err(Error::Unauthorized(_))));
    }

    #[test]
    fn session_role_comes_from_identity_store() {
        let mut store = populated_store();
        store
            .save(&CurrentUser(Some(Session::new("bob", Role::Admin))))
            .unwrap();
        let election = election(&mut store);
        assert_eq!(
            election.current_session().unwrap(),
            Some(Session::new("bob", Role::Voter))
        );
        assert!(matches!(
            election.acting_as(Role::Admin),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn session_survives_reopening_file_store() {
        init_logging();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("civic-vote.json");

        let mut store = FileStore::open(&path).unwrap();
        let signed_up = Election::new(&mut store, ElectionRules::default())
            .signup(SignupRequest::example_admin())
            .unwrap();
        drop(store);

        let mut store = FileStore::open(&path).unwrap();
        let election = Election::new(&mut store, ElectionRules::default());
        assert_eq!(election.current_session().unwrap(), Some(signed_up));
        assert!(election.acting_as(Role::Admin).is_ok());
    }
}
