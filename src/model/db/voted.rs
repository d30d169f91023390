use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{common::Username, storage::StoredValue};

/// The ballot tracker: usernames that have voted, in voting order.
///
/// A stored list that names someone twice is rejected when read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Username>", into = "Vec<Username>")]
pub struct VotedUsers(Vec<Username>);

impl VotedUsers {
    pub fn contains(&self, username: &str) -> bool {
        self.0.iter().any(|u| u == username)
    }

    /// Record that the user voted. Returns false if they already had.
    pub fn insert(&mut self, username: &str) -> bool {
        if self.contains(username) {
            return false;
        }
        self.0.push(username.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<Username>> for VotedUsers {
    type Error = String;

    fn try_from(usernames: Vec<Username>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(usernames.len());
        for username in &usernames {
            if !seen.insert(username.as_str()) {
                return Err(format!("{username} recorded as voting more than once"));
            }
        }
        Ok(Self(usernames))
    }
}

impl From<VotedUsers> for Vec<Username> {
    fn from(voted: VotedUsers) -> Self {
        voted.0
    }
}

impl StoredValue for VotedUsers {
    const KEY: &'static str = "votedUsers";

    fn absent() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut voted = VotedUsers::default();
        assert!(voted.insert("bob"));
        assert!(!voted.insert("bob"));
        assert!(voted.insert("carol"));
        assert_eq!(voted.iter().collect::<Vec<_>>(), ["bob", "carol"]);
    }

    #[test]
    fn duplicates_rejected_on_read() {
        assert!(serde_json::from_str::<VotedUsers>(r#"["bob", "bob"]"#).is_err());
        assert_eq!(
            serde_json::from_str::<VotedUsers>(r#"["bob"]"#).unwrap().len(),
            1
        );
    }
}
