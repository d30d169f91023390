mod role;

pub use role::Role;

/// Usernames are the primary key of the identity store.
pub type Username = String;
/// Candidate IDs are opaque strings.
pub type CandidateId = String;
