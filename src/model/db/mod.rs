//! Store-compatible (de/serialisable) types, one per persisted key.

pub mod candidate;
pub mod session;
pub mod tally;
pub mod user;
pub mod voted;

pub use candidate::{Candidate, CandidateCore, Candidates, NewCandidate};
pub use session::{CurrentUser, Session};
pub use tally::VoteTally;
pub use user::{User, UserCore, Users};
pub use voted::VotedUsers;
