//! SQL DDL for initializing the local storage schema.

/// SQLite schema includes:
/// - `kv_store` table (one serialized value per fixed key)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL -- RFC3339
);
"#;
