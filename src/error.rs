use argon2::Error as Argon2Error;
use rocket::{
    http::{Status, StatusClass},
    response::{status::Custom, Responder},
    serde::json::Json,
    Request,
};
use serde::Serialize;
use thiserror::Error;

use crate::model::storage::StorageError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("{0} has already voted in this election")]
    AlreadyVoted(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Argon2(#[from] Argon2Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::BadRequest,
            Self::DuplicateUsername(_) => Status::Conflict,
            Self::InvalidCredentials | Self::Unauthorized(_) => Status::Unauthorized,
            Self::AlreadyVoted(_) => Status::Forbidden,
            Self::NotFound(_) => Status::NotFound,
            Self::Storage(_) | Self::Argon2(_) => Status::InternalServerError,
        }
    }
}

/// The body of every error response; `error` is shown to the user as-is.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        match status.class() {
            StatusClass::ServerError => error!("{self}"),
            _ => warn!("{self}"),
        }
        // Internal failures are not described to the client.
        let error = match status.class() {
            StatusClass::ServerError => "An error occurred. Please try again.".to_string(),
            _ => self.to_string(),
        };
        Custom(status, Json(ErrorBody { error })).respond_to(req)
    }
}
