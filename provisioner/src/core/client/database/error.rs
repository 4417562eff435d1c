use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use super::constant::error_code;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),
}

impl DatabaseError {
    /// Server error code carried by the reply, if any.
    pub fn server_code(&self) -> Option<i32> {
        let DatabaseError::MongoError(err) = self else { return None };
        match &*err.kind {
            ErrorKind::Command(command_error) => Some(command_error.code),
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => Some(write_error.code),
            ErrorKind::Write(WriteFailure::WriteConcernError(concern_error)) => Some(concern_error.code),
            _ => None,
        }
    }

    pub fn is_namespace_exists(&self) -> bool {
        self.server_code() == Some(error_code::NAMESPACE_EXISTS)
    }

    pub fn is_duplicate_key(&self) -> bool {
        self.server_code() == Some(error_code::DUPLICATE_KEY)
    }

    /// An index with the same name or keys but different options is already present.
    pub fn is_index_conflict(&self) -> bool {
        matches!(
            self.server_code(),
            Some(error_code::INDEX_OPTIONS_CONFLICT) | Some(error_code::INDEX_KEY_SPECS_CONFLICT)
        )
    }
}
