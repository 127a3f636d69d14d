//! Live Editor Backend
//!
//! Hosts per-tenant editor sessions for the website builder: theme application,
//! theme switching with backups, and backup restore, with a SQLite tenant store
//! feeding the live preview.

mod api;
mod config;
mod db;
mod editor;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use editor::EditorService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<EditorService>,
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

    tracing::info!("Starting Live Editor Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Final refresh delay: {:?}", config.refresh_delay);

    // Initialize tenant store
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let editor = Arc::new(EditorService::new(repo, config.refresh_delay));

    // Create application state
    let state = AppState {
        editor,
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
    tracing::debug!(
        "Building router (final refresh delay {:?})",
        state.config.refresh_delay
    );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Themes
        .route("/themes", get(api::list_themes))
        .route("/themes/{n}", get(api::get_theme))
        // Editor store
        .route("/tenants/{tenant}/editor", get(api::get_editor))
        .route(
            "/tenants/{tenant}/editor/current-page",
            put(api::set_current_page),
        )
        .route(
            "/tenants/{tenant}/editor/pages/{slug}",
            put(api::set_page_components),
        )
        .route("/tenants/{tenant}/editor/layout", put(api::set_website_layout))
        .route(
            "/tenants/{tenant}/editor/globals/{slot}",
            put(api::change_global_variant),
        )
        // Theme switching
        .route("/tenants/{tenant}/themes/{n}/apply", post(api::apply_theme))
        .route("/tenants/{tenant}/themes/{n}/switch", post(api::switch_theme))
        // Backups
        .route(
            "/tenants/{tenant}/backups/{key}/restore",
            post(api::restore_backup),
        )
        // Tenant store
        .route("/tenants/{tenant}/document", get(api::get_tenant_document));

    // Health check
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
