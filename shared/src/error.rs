use thiserror::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum SharedError {
    /// Nothing to look up: the named field was empty.
    #[error("Required field missing: {0}")]
    MissingField(String),

    /// The store has no such item; carries what was looked up.
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, SharedError>;
