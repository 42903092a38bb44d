use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::quote::{Quote, QuoteDraft};
use crate::server::AppState;
use crate::storage::{ListQuery, QuotePage};

/// Request body for create and update
#[derive(Deserialize)]
pub struct QuoteInput {
    pub quote_text: Option<String>,
    pub character: Option<String>,
}

impl QuoteInput {
    /// Validate into a draft; missing fields fail the same way empty ones do
    fn into_draft(self) -> Result<QuoteDraft, (StatusCode, Json<ErrorResponse>)> {
        QuoteDraft::new(
            self.quote_text.unwrap_or_default(),
            self.character.unwrap_or_default(),
        )
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<QuotePage>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let page = store.list_quotes(&query)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    tracing::debug!(count = page.quotes.len(), total = page.total, "listed quotes");
    Ok(Json(page))
}

pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Quote>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let quote = store.get_quote(id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(ErrorResponse { error: format!("Quote {} not found", id) })))?;

    Ok(Json(quote))
}

pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    Json(input): Json<QuoteInput>,
) -> Result<(StatusCode, Json<Quote>), (StatusCode, Json<ErrorResponse>)> {
    let draft = input.into_draft()?;

    let store = state.store.lock().await;
    let quote = store.insert_quote(&draft)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    tracing::info!(id = quote.id, "created quote");
    Ok((StatusCode::CREATED, Json(quote)))
}

pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<QuoteInput>,
) -> Result<Json<Quote>, (StatusCode, Json<ErrorResponse>)> {
    let draft = input.into_draft()?;

    let store = state.store.lock().await;
    let quote = store.update_quote(id, &draft)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(ErrorResponse { error: format!("Quote {} not found", id) })))?;

    tracing::info!(id, "updated quote");
    Ok(Json(quote))
}

pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let deleted = store.delete_quote(id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, Json(ErrorResponse { error: format!("Quote {} not found", id) })));
    }

    tracing::info!(id, "deleted quote");
    Ok(Json(serde_json::json!({ "message": format!("Quote {} deleted", id) })))
}

pub async fn random_quote(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Quote>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let quote = store.random_quote()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(ErrorResponse { error: "No quotes available".to_string() })))?;

    tracing::debug!(id = quote.id, "served random quote");
    Ok(Json(quote))
}

pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let store = state.store.lock().await;
    let characters = store.distinct_characters()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))?;

    Ok(Json(serde_json::json!({ "characters": characters })))
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let store = state.store.lock().await;
    match store.count_quotes() {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "quote_count": count,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "unhealthy",
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// The one HTML page: a random quote, or a placeholder when the store is
/// empty or the query fails
pub async fn index(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    let store = state.store.lock().await;
    match store.random_quote() {
        Ok(Some(quote)) => (
            StatusCode::OK,
            Html(render_quote_page(&quote.quote_text, Some(&quote.character))),
        ),
        Ok(None) => (
            StatusCode::OK,
            Html(render_quote_page(
                "No quotes available! Please add some quotes.",
                None,
            )),
        ),
        Err(e) => {
            tracing::error!("Error rendering index: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_quote_page("Something went wrong! Please try again.", None)),
            )
        }
    }
}

fn render_quote_page(quote_text: &str, character: Option<&str>) -> String {
    let attribution = character
        .map(|c| format!("<p class=\"character\">&mdash; {}</p>", escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Quotebox</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40em; margin: 4em auto; text-align: center; }}
    blockquote {{ font-size: 1.5em; }}
    .character {{ color: #555; }}
  </style>
</head>
<body>
  <blockquote>{}</blockquote>
  {}
  <p><a href="/">another one</a></p>
</body>
</html>
"#,
        escape_html(quote_text),
        attribution,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_render_quote_page_escapes_content() {
        let page = render_quote_page("<script>alert(1)</script>", Some("Bender"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("Bender"));
    }
}
