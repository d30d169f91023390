use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Voter,
    Admin,
}

impl Role {
    /// The role given to a new user: the very first user administers the election.
    pub fn for_new_user(existing_users: usize) -> Self {
        if existing_users == 0 {
            Self::Admin
        } else {
            Self::Voter
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Voter => "voter",
                Self::Admin => "admin",
            }
        )
    }
}
