//! Error types for Passgen

use thiserror::Error;

/// Main error type for generator, history and account operations
#[derive(Error, Debug)]
pub enum PassgenError {
    /// Requested password length is below the minimum
    #[error("Invalid length: {0} (minimum is {min})", min = crate::PASSWORD_MIN_LENGTH)]
    InvalidLength(usize),

    /// No character class was enabled
    #[error("No character class selected")]
    NoCharacterClassSelected,

    /// Requested length cannot hold one character of every enabled class
    #[error("Length {length} is too short for {classes} enabled character classes")]
    LengthTooShortForClasses { length: usize, classes: usize },

    /// Batch size outside the allowed range
    #[error(
        "Invalid password count: {0} (allowed {min}..={max})",
        min = crate::BATCH_MIN,
        max = crate::BATCH_MAX
    )]
    InvalidCount(usize),

    /// History database file not found at the specified path
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Unsupported database version
    #[error("Invalid database version: {0}")]
    InvalidVersion(String),

    /// History entry not found
    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(String),

    /// History cap must keep at least one entry
    #[error("Invalid history cap: {0}")]
    InvalidMaxEntries(usize),

    /// Required request field was empty
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Email address is not syntactically valid
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Display name is too short
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Account password does not meet the minimum length
    #[error("Password must be at least {min} characters", min = crate::ACCOUNT_PASSWORD_MIN_LENGTH)]
    WeakPassword,

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Email is already registered
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Reset token unknown, used or expired
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// User referenced by a reset token no longer exists
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Session token failed verification
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    /// Password hashing failed
    #[error("Hash error: {0}")]
    HashError(String),

    /// Mail delivery failed
    #[error("Mail error: {0}")]
    MailError(String),

    /// Configuration value could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<rusqlite::Error> for PassgenError {
    fn from(err: rusqlite::Error) -> Self {
        PassgenError::DatabaseError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PassgenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PassgenError::InvalidToken(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for PassgenError {
    fn from(err: argon2::password_hash::Error) -> Self {
        PassgenError::HashError(err.to_string())
    }
}

/// Result type alias for Passgen operations
pub type Result<T> = std::result::Result<T, PassgenError>;
