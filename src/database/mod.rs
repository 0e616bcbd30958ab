//! Database layer for Passgen
//!
//! Handles SQLite storage of the generation history:
//! - Schema creation and migrations
//! - History queries

pub mod models;
pub mod schema;
pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Database;
pub use models::*;
