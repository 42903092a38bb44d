//! Quote entity - the one persisted record of the application
//!
//! A quote is a line of dialogue attributed to a character, with
//! creation/update timestamps maintained by the store.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the stored character name, in characters.
///
/// SQLite does not enforce column lengths, so the limit is checked at
/// validation time instead.
pub const MAX_CHARACTER_LEN: usize = 100;

/// A persisted quote.
///
/// `id` is assigned by the store on insert and never reused after deletion.
/// `updated_at >= created_at` holds for every row; both are equal until the
/// first update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Store-assigned identifier, immutable
    pub id: i64,
    /// The quote itself, trimmed, never empty
    pub quote_text: String,
    /// Character the quote is attributed to, trimmed, never empty
    pub character: String,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Reset on every successful update
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Quote {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Quote {}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.quote_text, self.character)
    }
}

/// Validated input for creating or updating a quote.
///
/// Construction trims both fields and rejects empty or oversized values, so
/// a draft that exists is always safe to persist. Fields stay private to
/// keep construction the only way in.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    quote_text: String,
    character: String,
}

impl QuoteDraft {
    /// Build a draft from raw input, trimming leading/trailing whitespace
    pub fn new(quote_text: impl Into<String>, character: impl Into<String>) -> Result<Self> {
        let quote_text = quote_text.into().trim().to_string();
        let character = character.into().trim().to_string();

        if quote_text.is_empty() {
            return Err(Error::Validation("quote_text must not be empty".into()));
        }
        if character.is_empty() {
            return Err(Error::Validation("character must not be empty".into()));
        }
        if character.chars().count() > MAX_CHARACTER_LEN {
            return Err(Error::Validation(format!(
                "character must be at most {} characters",
                MAX_CHARACTER_LEN
            )));
        }

        Ok(Self { quote_text, character })
    }

    pub fn quote_text(&self) -> &str {
        &self.quote_text
    }

    pub fn character(&self) -> &str {
        &self.character
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_trims_fields() {
        let draft = QuoteDraft::new("  Good news, everyone!  ", " Professor ").unwrap();
        assert_eq!(draft.quote_text(), "Good news, everyone!");
        assert_eq!(draft.character(), "Professor");
    }

    #[test]
    fn test_draft_rejects_empty_fields() {
        assert!(QuoteDraft::new("", "Bender").is_err());
        assert!(QuoteDraft::new("Bite my shiny metal ass!", "").is_err());
        assert!(QuoteDraft::new("   ", "Bender").is_err());
        assert!(QuoteDraft::new("Woop woop woop!", "  \t ").is_err());
    }

    #[test]
    fn test_draft_character_length_limit() {
        let at_limit = "x".repeat(MAX_CHARACTER_LEN);
        assert!(QuoteDraft::new("quote", &at_limit).is_ok());

        let too_long = "x".repeat(MAX_CHARACTER_LEN + 1);
        assert!(QuoteDraft::new("quote", &too_long).is_err());
    }

    #[test]
    fn test_quote_json_round_trip() {
        let quote = Quote {
            id: 7,
            quote_text: "Shut up and take my money!".to_string(),
            character: "Fry".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&quote).unwrap();
        let parsed: Quote = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, quote.id);
        assert_eq!(parsed.quote_text, quote.quote_text);
        assert_eq!(parsed.character, quote.character);
    }
}
