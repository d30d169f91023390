use serde::{Deserialize, Serialize};

use crate::model::{
    common::{Role, Username},
    storage::StoredValue,
};

/// The currently signed-in user, persisted so a restart restores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: Username,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<Username>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Wrapper giving "no session" a place in the typed store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentUser(pub Option<Session>);

impl StoredValue for CurrentUser {
    const KEY: &'static str = "currentUser";

    fn absent() -> Self {
        Self(None)
    }
}
