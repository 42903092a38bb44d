use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::QuoteStore;

pub mod routes;

/// Server state: the one explicit store handle shared by all handlers
pub struct AppState {
    pub store: Mutex<QuoteStore>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/quotes", get(routes::list_quotes).post(routes::create_quote))
        .route("/api/quotes/random", get(routes::random_quote))
        .route("/api/quotes/characters", get(routes::list_characters))
        .route(
            "/api/quotes/{id}",
            get(routes::get_quote)
                .put(routes::update_quote)
                .delete(routes::delete_quote),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: QuoteStore) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Quotebox running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
