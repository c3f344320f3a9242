//! StackIt Backend
//!
//! A REST backend for the StackIt Q&A forum: an in-memory entity store with
//! a durably mirrored saved-question list.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::{SavedStore, Store};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StackIt Backend");
    tracing::info!("Saved-question slot: {:?}", config.saved_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (STACKIT_API_PSK). Authentication is disabled!");
    }

    // Initialize the entity store; the saved-question set is loaded from
    // the durable slot, everything else is seeded in memory.
    let saved_store = SavedStore::new(&config.saved_path);
    let store = Arc::new(Store::open(saved_store, store::seed::current_user()).await);

    let snapshot = store.snapshot().await;
    tracing::info!(
        "Store initialized with {} questions, {} saved",
        snapshot.questions.len(),
        snapshot.saved_question_ids.len()
    );

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        .route("/datastore/revision", get(api::get_revision))
        // Questions
        .route("/questions", get(api::list_questions))
        .route("/questions", post(api::create_question))
        .route("/questions/{id}", get(api::get_question))
        .route("/questions/{id}/views", post(api::record_view))
        .route("/questions/{id}/votes", post(api::vote_question))
        // Answers
        .route("/questions/{id}/answers", post(api::create_answer))
        .route(
            "/questions/{id}/answers/{answer_id}/votes",
            post(api::vote_answer),
        )
        .route(
            "/questions/{id}/answers/{answer_id}/accept",
            post(api::accept_answer),
        )
        // Tags
        .route("/tags", get(api::list_tags))
        .route("/tags/{name}/questions", get(api::questions_by_tag))
        // Stats
        .route("/stats", get(api::get_stats))
        // Users
        .route("/users/me", get(api::get_current_user))
        .route("/users/{id}/questions", get(api::user_questions))
        .route("/users/{id}/answers", get(api::user_answers))
        // Saved questions
        .route("/saved", get(api::list_saved))
        .route("/saved/{question_id}/toggle", post(api::toggle_saved))
        // Notifications
        .route("/notifications", get(api::list_notifications))
        .route(
            "/notifications/read-all",
            post(api::mark_all_notifications_read),
        )
        .route(
            "/notifications/{id}/read",
            post(api::mark_notification_read),
        )
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
