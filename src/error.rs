use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Common result type used across the crate.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Unified error enum surfaced by all admin operations.
///
/// Every variant carries only the message text of the underlying failure.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("driver error: {0}")]
    Driver(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Server error codes relevant to provisioning.
const USER_NOT_FOUND: i32 = 11;
const NAMESPACE_NOT_FOUND: i32 = 26;
const NAMESPACE_EXISTS: i32 = 48;
const DUPLICATE_KEY: i32 = 11000;
const USER_ALREADY_EXISTS: i32 = 51003;
const UNAUTHORIZED: i32 = 13;
const AUTHENTICATION_FAILED: i32 = 18;

impl AdminError {
    pub(crate) fn from_code(code: i32, message: String) -> Self {
        match code {
            NAMESPACE_EXISTS | DUPLICATE_KEY | USER_ALREADY_EXISTS => {
                AdminError::AlreadyExists(message)
            }
            USER_NOT_FOUND | NAMESPACE_NOT_FOUND => AdminError::NotFound(message),
            UNAUTHORIZED | AUTHENTICATION_FAILED => AdminError::Authentication(message),
            _ => AdminError::Command(message),
        }
    }
}

impl From<mongodb::error::Error> for AdminError {
    fn from(value: mongodb::error::Error) -> Self {
        let message = value.to_string();
        match value.kind.as_ref() {
            ErrorKind::Command(cmd) => AdminError::from_code(cmd.code, message),
            ErrorKind::Write(WriteFailure::WriteError(write)) => {
                AdminError::from_code(write.code, message)
            }
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => AdminError::Connection(message),
            ErrorKind::Authentication { .. } => AdminError::Authentication(message),
            ErrorKind::InvalidArgument { .. } => AdminError::InvalidInput(message),
            _ => AdminError::Driver(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AdminError;

    #[test]
    fn user_exists_code_maps_to_already_exists() {
        let err = AdminError::from_code(51003, "User \"u@db\" already exists".into());
        assert!(matches!(err, AdminError::AlreadyExists(ref m) if m.contains("already exists")));
    }

    #[test]
    fn unknown_code_maps_to_command() {
        let err = AdminError::from_code(2, "BadValue".into());
        assert!(matches!(err, AdminError::Command(_)));
        assert_eq!(err.to_string(), "command failed: BadValue");
    }

    #[test]
    fn custom_driver_error_keeps_message() {
        let driver = mongodb::error::Error::custom("boom");
        let err = AdminError::from(driver);
        assert!(matches!(err, AdminError::Driver(_)));
    }
}
