use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use argon2::{Config, Error as Argon2Error};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{
    common::{Role, Username},
    storage::StoredValue,
};

/// Core user data, as stored in the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCore {
    /// Encoded argon2 hash, including its salt and parameters.
    #[serde(rename = "password")]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserCore {
    /// Create a new user by hashing the given plaintext password.
    pub fn new(password: &str, role: Role) -> Result<Self, Argon2Error> {
        // 16 bytes is recommended for password hashing:
        //  https://en.wikipedia.org/wiki/Argon2
        let mut salt = [0_u8; 16];
        rand::thread_rng().fill(&mut salt);
        let password_hash = argon2::hash_encoded(password.as_bytes(), &salt, &Config::default())?;
        Ok(Self {
            password_hash,
            role,
            created_at: Utc::now(),
        })
    }

    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> Result<bool, Argon2Error> {
        argon2::verify_encoded(&self.password_hash, password.as_ref())
    }
}

/// A user together with their username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: Username,
    pub user: UserCore,
}

impl Deref for User {
    type Target = UserCore;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl DerefMut for User {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.user
    }
}

/// The identity store: every user, keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Users(BTreeMap<Username, UserCore>);

impl Users {
    pub fn get(&self, username: &str) -> Option<User> {
        self.0.get(username).map(|core| User {
            username: username.to_string(),
            user: core.clone(),
        })
    }

    pub fn contains(&self, username: &str) -> bool {
        self.0.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a brand new user. Returns false, leaving the store untouched, if the name is taken.
    pub fn insert(&mut self, user: User) -> bool {
        if self.contains(&user.username) {
            return false;
        }
        self.0.insert(user.username, user.user);
        true
    }
}

impl StoredValue for Users {
    const KEY: &'static str = "users";

    fn absent() -> Self {
        Self::default()
    }
}
