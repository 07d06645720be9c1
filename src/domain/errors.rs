//! # Error Taxonomy
//!
//! Typed failures the core components can produce. Permission and validation
//! variants are recovered locally by the dispatcher and turned into rejection
//! messages; persistence variants abort the specific mutation and surface to
//! the caller. None of these is fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("unknown medium: {0}")]
    UnknownMedium(String),
    #[error("cannot decode navigation token '{0}'")]
    Decode(String),
    #[error("no document stored for '{0}'")]
    NotFound(String),
    #[error("sender is not an administrator")]
    PermissionDenied,
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("invalid file key '{0}', expected medium_medium_subject_year")]
    InvalidKeyFormat(String),
    #[error("the bootstrap administrator cannot be removed")]
    CannotRemoveBootstrapAdmin,
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Persistence(err.to_string())
    }
}
