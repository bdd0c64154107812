use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found in the database")]
    AuthenticationPrincipalNotFound,
    #[error("{0}")]
    NameConflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl AccountError {
    pub fn user_id_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("User with id {} does not exist", id))
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
