use crate::error::{Error, Result};
use crate::model::{
    api::auth::{LoginRequest, SignupRequest},
    common::Role,
    db::{CurrentUser, Session, User, UserCore, Users, VotedUsers},
    storage::{Batch, KeyValueStore, StorageError, StoredValue, TypedStore},
};

use super::Election;

impl<'s, S: KeyValueStore + ?Sized> Election<'s, S> {
    /// Create a user and sign them in.
    ///
    /// The first user ever created becomes the admin; everyone after is a voter.
    pub fn signup(&mut self, request: SignupRequest) -> Result<Session> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }
        if request.password != request.confirm_password {
            return Err(Error::validation("Passwords do not match"));
        }

        let mut users: Users = self.store.load()?;
        if users.contains(&request.username) {
            return Err(Error::DuplicateUsername(request.username));
        }

        let role = Role::for_new_user(users.len());
        let user = User {
            username: request.username,
            user: UserCore::new(&request.password, role)?,
        };
        let session = Session::new(user.username.clone(), role);
        users.insert(user);

        let mut batch = Batch::new();
        batch
            .save(&users)?
            .save(&CurrentUser(Some(session.clone())))?;
        self.store.commit(batch)?;

        info!("Signed up {} as {}", session.username, session.role);
        Ok(session)
    }

    /// Check credentials and sign the user in.
    pub fn login(&mut self, request: LoginRequest) -> Result<Session> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }

        let users: Users = self.store.load()?;
        let user = users.get(&request.username).ok_or_else(|| {
            warn!("Login attempt for unknown user {}", request.username);
            Error::InvalidCredentials
        })?;
        let password_ok = user
            .verify_password(&request.password)
            .map_err(|e| StorageError::malformed(Users::KEY, e))?;
        if !password_ok {
            warn!("Wrong password for {}", user.username);
            return Err(Error::InvalidCredentials);
        }

        if user.role == Role::Voter && self.rules.block_voted_login {
            let voted: VotedUsers = self.store.load()?;
            if voted.contains(&user.username) {
                return Err(Error::AlreadyVoted(user.username));
            }
        }

        let role = user.role;
        let session = Session::new(user.username, role);
        self.store.save(&CurrentUser(Some(session.clone())))?;
        info!("Signed in {} as {}", session.username, session.role);
        Ok(session)
    }

    /// Forget the current session, if any.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear::<CurrentUser>()?;
        debug!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::election::{test_support::*, ElectionRules};
    use crate::model::storage::MemoryStore;

    use super::*;

    #[test]
    fn first_signup_is_admin_rest_are_voters() {
        init_logging();
        let mut store = MemoryStore::new();
        let mut election = election(&mut store);

        let roles = ["alice", "bob", "carol", "dave"]
            .into_iter()
            .map(|name| {
                election
                    .signup(SignupRequest::new(name, "password"))
                    .unwrap()
                    .role
            })
            .collect::<Vec<_>>();
        assert_eq!(roles, [Role::Admin, Role::Voter, Role::Voter, Role::Voter]);

        let users: Users = store.load().unwrap();
        assert_eq!(users.len(), 4);
        assert_eq!(users.get("alice").unwrap().role, Role::Admin);
    }

    #[test]
    fn signup_signs_in() {
        let mut store = MemoryStore::new();
        let session = election(&mut store)
            .signup(SignupRequest::example_admin())
            .unwrap();
        assert_eq!(session, Session::new("alice", Role::Admin));
        assert_eq!(
            store.load::<CurrentUser>().unwrap(),
            CurrentUser(Some(session))
        );
    }

    #[test]
    fn duplicate_signup_leaves_store_unchanged() {
        let mut store = populated_store();
        let before = store.clone();

        let result = election(&mut store).signup(SignupRequest::new("bob", "other-password"));
        assert!(matches!(result, Err(Error::DuplicateUsername(name)) if name == "bob"));
        assert_eq!(store, before);
    }

    #[test]
    fn signup_validation() {
        let mut store = MemoryStore::new();
        let mut election = election(&mut store);

        for request in [
            SignupRequest::new("", "password"),
            SignupRequest::new("alice", ""),
            SignupRequest {
                confirm_password: "different".to_string(),
                ..SignupRequest::example_admin()
            },
        ] {
            assert!(matches!(
                election.signup(request),
                Err(Error::Validation(_))
            ));
        }
        assert!(store.load::<Users>().unwrap().is_empty());
    }

    #[test]
    fn usernames_are_taken_verbatim() {
        let mut store = populated_store();
        let mut election = election(&mut store);

        let padded = election
            .signup(SignupRequest::new("  bob", "password"))
            .unwrap();
        assert_eq!(padded.username, "  bob");
        let blank = election
            .signup(SignupRequest::new("   ", "password"))
            .unwrap();
        assert_eq!(blank.username, "   ");

        let users: Users = store.load().unwrap();
        assert_eq!(users.len(), 4);
        assert!(users.contains("bob") && users.contains("  bob"));
    }

    #[test]
    fn login_checks_credentials() {
        let mut store = populated_store();
        let mut election = election(&mut store);

        assert!(matches!(
            election.login(LoginRequest::new("nobody", "password")),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            election.login(LoginRequest::new("bob", "alice-password")),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            election.login(LoginRequest::new("bob", "")),
            Err(Error::Validation(_))
        ));
        assert_eq!(election.current_session().unwrap(), None);

        let session = election.login(LoginRequest::example_voter()).unwrap();
        assert_eq!(session, Session::new("bob", Role::Voter));
        assert_eq!(election.current_session().unwrap(), Some(session));
    }

    #[test]
    fn voted_voter_cannot_log_back_in() {
        let mut store = populated_store();
        login_voter(&mut store);
        election(&mut store).cast_vote("2").unwrap();
        election(&mut store).logout().unwrap();

        let result = election(&mut store).login(LoginRequest::example_voter());
        assert!(matches!(result, Err(Error::AlreadyVoted(name)) if name == "bob"));
        assert_eq!(store.load::<CurrentUser>().unwrap(), CurrentUser(None));

        // Admins are never blocked.
        login_admin(&mut store);
    }

    #[test]
    fn voted_voter_can_log_in_when_rule_disabled() {
        let mut store = populated_store();
        store.save(&VotedUsers::try_from(vec!["bob".to_string()]).unwrap()).unwrap();
        let rules = ElectionRules {
            block_voted_login: false,
            ..ElectionRules::default()
        };

        let session = Election::new(&mut store, rules)
            .login(LoginRequest::example_voter())
            .unwrap();
        assert_eq!(session.role, Role::Voter);
    }

    #[test]
    fn logout_always_clears() {
        let mut store = MemoryStore::new();
        election(&mut store).logout().unwrap();

        election(&mut store)
            .signup(SignupRequest::example_admin())
            .unwrap();
        election(&mut store).logout().unwrap();
        assert_eq!(store.get(CurrentUser::KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_password_hash_is_a_storage_error() {
        let mut store = MemoryStore::new();
        store
            .set(
                Users::KEY,
                r#"{"mallory": {"password": "bm90LWEtaGFzaA==", "role": "voter", "createdAt": "2024-01-01T00:00:00Z"}}"#
                    .to_string(),
            )
            .unwrap();
        let result = election(&mut store).login(LoginRequest::new("mallory", "not-a-hash"));
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::Malformed { .. }))
        ));
    }
}
