//! SQLite storage implementation

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};

use crate::Result;
use crate::quote::{Quote, QuoteDraft};
use super::schema;

/// Pagination limits applied by [`QuoteStore::list_quotes`].
///
/// The store owns the clamp so every caller gets the same bounds.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    /// Page size used when the caller does not ask for one
    pub default_per_page: usize,
    /// Hard upper bound on the page size
    pub max_per_page: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: 100,
        }
    }
}

/// Query parameters for listing quotes.
///
/// All fields are optional; missing values fall back to the store's
/// [`PageLimits`]. Empty filter strings are treated as absent.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    /// Case-insensitive substring match on the character name
    pub character: Option<String>,
    /// Case-insensitive substring match on the quote text
    pub search: Option<String>,
}

impl ListQuery {
    /// Filter-only query over everything, first page with store defaults
    pub fn by_character(character: impl Into<String>) -> Self {
        Self {
            character: Some(character.into()),
            ..Self::default()
        }
    }
}

/// One page of quotes plus the pagination bookkeeping.
///
/// `total` counts all rows matching the filters before pagination, so an
/// out-of-range page comes back with empty `quotes` and the real `total`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuotePage {
    pub quotes: Vec<Quote>,
    pub total: usize,
    /// Effective page number after normalization
    pub page: usize,
    /// Effective page size after clamping
    pub per_page: usize,
    /// `ceil(total / per_page)`, 0 when nothing matched
    pub pages: usize,
}

/// SQLite-backed store for quotes - the single access path for all reads
/// and writes.
///
/// Every operation is one bounded query; SQLite serializes conflicting
/// writes, so a failed statement leaves the prior committed state intact.
pub struct QuoteStore {
    conn: Connection,
    limits: PageLimits,
}

impl QuoteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn,
            limits: PageLimits::default(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn,
            limits: PageLimits::default(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Override the pagination limits
    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Write Operations ==========

    /// Insert a new quote, assigning a fresh id and both timestamps
    pub fn insert_quote(&self, draft: &QuoteDraft) -> Result<Quote> {
        let now = Utc::now();
        self.conn.execute(
            r#"
            INSERT INTO quotes (quote_text, character, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![draft.quote_text(), draft.character(), now, now],
        )?;

        Ok(Quote {
            id: self.conn.last_insert_rowid(),
            quote_text: draft.quote_text().to_string(),
            character: draft.character().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace both fields of an existing quote and reset `updated_at`.
    ///
    /// Returns `None` when the id is absent. `created_at` is never touched.
    pub fn update_quote(&self, id: i64, draft: &QuoteDraft) -> Result<Option<Quote>> {
        let now = Utc::now();
        let changed = self.conn.execute(
            "UPDATE quotes SET quote_text = ?1, character = ?2, updated_at = ?3 WHERE id = ?4",
            params![draft.quote_text(), draft.character(), now, id],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        self.get_quote(id)
    }

    /// Delete a quote by id. Returns `false` when the id is absent.
    pub fn delete_quote(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM quotes WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Delete every quote (used by the seed loader's clear mode)
    pub fn delete_all_quotes(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM quotes", [])?;
        Ok(deleted)
    }

    // ========== Read Operations ==========

    /// Get a quote by id
    pub fn get_quote(&self, id: i64) -> Result<Option<Quote>> {
        self.conn
            .query_row(
                "SELECT id, quote_text, character, created_at, updated_at FROM quotes WHERE id = ?1",
                [id],
                |row| self.row_to_quote(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// List quotes in insertion order with optional filters and pagination.
    ///
    /// Both filters are substring matches; SQLite's LIKE is case-insensitive
    /// for ASCII. Filters combine with AND.
    pub fn list_quotes(&self, query: &ListQuery) -> Result<QuotePage> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(self.limits.default_per_page)
            .clamp(1, self.limits.max_per_page);

        let mut filters = Vec::new();
        let mut patterns: Vec<String> = Vec::new();
        if let Some(character) = query.character.as_deref().filter(|c| !c.is_empty()) {
            filters.push("character LIKE ?");
            patterns.push(format!("%{}%", character));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            filters.push("quote_text LIKE ?");
            patterns.push(format!("%{}%", search));
        }
        let where_sql = if filters.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", filters.join(" AND "))
        };

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM quotes{}", where_sql),
            params_from_iter(patterns.iter()),
            |row| row.get(0),
        )?;
        let total = total as usize;

        let sql = format!(
            "SELECT id, quote_text, character, created_at, updated_at FROM quotes{} \
             ORDER BY id ASC LIMIT {} OFFSET {}",
            where_sql,
            per_page,
            (page - 1) * per_page,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let quotes = stmt
            .query_map(params_from_iter(patterns.iter()), |row| {
                self.row_to_quote(row)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QuotePage {
            quotes,
            total,
            page,
            per_page,
            pages: total.div_ceil(per_page),
        })
    }

    /// Pick one quote uniformly at random among all rows.
    ///
    /// Delegated to the engine (`ORDER BY RANDOM() LIMIT 1`) rather than
    /// fetched and shuffled. Returns `None` on an empty store.
    pub fn random_quote(&self) -> Result<Option<Quote>> {
        self.conn
            .query_row(
                "SELECT id, quote_text, character, created_at, updated_at FROM quotes \
                 ORDER BY RANDOM() LIMIT 1",
                [],
                |row| self.row_to_quote(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Unique character names, lexicographically ascending, case-sensitive
    pub fn distinct_characters(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT character FROM quotes ORDER BY character ASC")?;
        let characters = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(characters)
    }

    /// Count all quotes
    pub fn count_quotes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            quotes: self.count_quotes()?,
            characters: self.distinct_characters()?.len(),
        })
    }

    /// Helper to convert a row to a Quote
    fn row_to_quote(&self, row: &rusqlite::Row) -> rusqlite::Result<Quote> {
        Ok(Quote {
            id: row.get(0)?,
            quote_text: row.get(1)?,
            character: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub quotes: usize,
    pub characters: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        writeln!(f, "  Quotes: {}", self.quotes)?;
        writeln!(f, "  Characters: {}", self.characters)
    }
}
