//! # Passgen
//!
//! A secure password generator library.
//!
//! ## Features
//!
//! - Constrained-random generation: one character from every enabled class,
//!   uniform filling and a Fisher-Yates shuffle
//! - Batch generation
//! - SQLite-backed generation history (capped, newest first)
//! - Demo account flows (register, login, forgot/reset password)
//!
//! ## Example
//!
//! ```
//! use passgen::{generate_password, PasswordOptions};
//!
//! let password = generate_password(12, &PasswordOptions::default()).unwrap();
//! assert_eq!(password.chars().count(), 12);
//! ```

pub mod generator;
pub mod database;
pub mod history;
pub mod auth;
pub mod config;
pub mod utils;
pub mod error;
pub mod export;

// Re-export main types
pub use error::{PassgenError, Result};
pub use generator::{
    generate_password, generate_password_with_rng, generate_passwords,
    generate_passwords_with_rng, CharacterClass, ClassCounts, GenerationRequest, PasswordOptions,
};
pub use database::models::{HistoryEntry, GenerationSettings};
pub use history::PasswordHistory;
pub use auth::{AuthStore, AuthSession, Claims, LogMailer, Mailer, PublicUser};
pub use config::Config;

/// Minimum generated password length
pub const PASSWORD_MIN_LENGTH: usize = 4;

/// Default generated password length
pub const PASSWORD_DEFAULT_LENGTH: usize = 12;

/// Minimum number of passwords per batch
pub const BATCH_MIN: usize = 1;

/// Maximum number of passwords per batch
pub const BATCH_MAX: usize = 20;

/// Maximum number of history entries kept
pub const HISTORY_MAX_ENTRIES: usize = 100;

/// Default number of entries returned by `recent`
pub const HISTORY_RECENT_DEFAULT: usize = 10;

/// Length of the random suffix of a history entry ID
pub const HISTORY_ID_SUFFIX_LENGTH: usize = 9;

/// History database filename
pub const DATABASE_FILENAME: &str = "history.db";

/// History database version
pub const DB_VERSION: &str = "2";

/// Minimum account password length
pub const ACCOUNT_PASSWORD_MIN_LENGTH: usize = 6;

/// Minimum account display name length (trimmed)
pub const ACCOUNT_NAME_MIN_LENGTH: usize = 2;

/// Reset token size in bytes (hex encoded to twice this length)
pub const RESET_TOKEN_BYTES: usize = 32;
