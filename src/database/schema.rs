//! Database schema definitions

/// SQL to create the properties table
pub const CREATE_PROPERTIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS passgen_properties (
    database_id     CHAR(32) NOT NULL PRIMARY KEY,
    version         CHAR(10),
    create_timestamp TEXT,
    update_timestamp TEXT
)
"#;

/// SQL to create the history table
pub const CREATE_HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS passgen_history (
    entry_id        VARCHAR NOT NULL PRIMARY KEY,
    password        VARCHAR NOT NULL,
    length          INTEGER NOT NULL,
    include_lowercase INTEGER NOT NULL DEFAULT 0,
    include_uppercase INTEGER NOT NULL DEFAULT 0,
    include_numbers INTEGER NOT NULL DEFAULT 0,
    include_symbols INTEGER NOT NULL DEFAULT 0,
    create_timestamp TEXT NOT NULL
)
"#;

/// SQL to index history by creation time (added in version 2)
pub const CREATE_HISTORY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS passgen_history_created
    ON passgen_history (create_timestamp)
"#;

/// All creation statements in order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_PROPERTIES_TABLE,
    CREATE_HISTORY_TABLE,
    CREATE_HISTORY_INDEX,
];
