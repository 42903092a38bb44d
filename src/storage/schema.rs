//! Database schema definitions

/// SQL to create the quotes table.
///
/// AUTOINCREMENT keeps SQLite from ever reusing a deleted rowid, so ids stay
/// unique across the lifetime of the database. Timestamps are RFC 3339 text.
pub const CREATE_QUOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quote_text TEXT NOT NULL,
    character TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_quotes_character ON quotes(character)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_QUOTES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
