use serde::{Deserialize, Serialize};

/// Raw signup details, received from a user. The password is never stored directly.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Raw login credentials, received from a user.
#[derive(Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl SignupRequest {
        pub fn new(username: &str, password: &str) -> Self {
            Self {
                username: username.to_string(),
                password: password.to_string(),
                confirm_password: password.to_string(),
            }
        }

        pub fn example_admin() -> Self {
            Self::new("alice", "alice-password")
        }

        pub fn example_voter() -> Self {
            Self::new("bob", "bob-password")
        }
    }

    impl LoginRequest {
        pub fn new(username: &str, password: &str) -> Self {
            Self {
                username: username.to_string(),
                password: password.to_string(),
            }
        }

        pub fn example_admin() -> Self {
            Self::new("alice", "alice-password")
        }

        pub fn example_voter() -> Self {
            Self::new("bob", "bob-password")
        }
    }
}
