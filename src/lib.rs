//! # Quotebox - Quote Machine
//!
//! A small web application serving quotes from the show, backed by SQLite.
//!
//! Quotebox provides:
//! - A quote store with pagination, character filtering and text search
//! - Uniform random quote selection delegated to the SQL engine
//! - A CRUD JSON API plus a single HTML page
//! - A seed loader for `"Character: quote text"` files

pub mod config;
pub mod quote;
pub mod seed;
pub mod server;
pub mod storage;

// Re-exports for convenient access
pub use quote::{Quote, QuoteDraft};
pub use storage::QuoteStore;

/// Result type alias for Quotebox operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Quotebox operations
///
/// Absence of a row is not an error: lookups signal it with `Option`/`bool`
/// and callers branch on it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected input, reported before any storage access
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
