//! Application startup and lifecycle management.

use crate::config::ClubConfig;
use crate::handlers::{
    clients, documents, events, expenses, export, health, plannings, profile,
};
use crate::services::{init_metrics, Database};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use club_core::error::AppError;
use club_core::middleware::metrics::metrics_middleware;
use club_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ClubConfig,
    pub db: Arc<Database>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ClubConfig) -> Result<Self, AppError> {
        Self::build_internal(config, true).await
    }

    /// Build the application without running migrations.
    /// Use this in tests when migrations are already applied by the test harness.
    pub async fn build_without_migrations(config: ClubConfig) -> Result<Self, AppError> {
        Self::build_internal(config, false).await
    }

    async fn build_internal(config: ClubConfig, run_migrations: bool) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        if run_migrations {
            db.run_migrations().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to run migrations");
                e
            })?;
        }

        let state = AppState {
            config: config.clone(),
            db: Arc::new(db),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "club-service listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = api_router(self.state.clone());

        tracing::info!(
            service = "club-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}

/// Build the full API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics_handler))
        .route("/profile", get(profile::get_profile).post(profile::create_profile))
        .route("/profile/plan", put(profile::update_plan))
        .route(
            "/clients",
            post(clients::create_client).get(clients::list_clients),
        )
        .route(
            "/clients/:client_id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/documents",
            post(documents::create_document).get(documents::list_documents),
        )
        .route("/documents/export", get(export::export_documents))
        .route(
            "/documents/:document_id",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route(
            "/documents/:document_id/status",
            put(documents::update_document_status),
        )
        .route(
            "/documents/:document_id/items",
            post(documents::add_line_item),
        )
        .route(
            "/documents/:document_id/items/:line_item_id",
            put(documents::update_line_item).delete(documents::remove_line_item),
        )
        .route(
            "/expenses",
            post(expenses::create_expense).get(expenses::list_expenses),
        )
        .route(
            "/expenses/:expense_id",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        .route(
            "/events",
            post(events::create_event).get(events::list_events),
        )
        .route(
            "/events/:event_id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/plannings",
            post(plannings::create_planning).get(plannings::list_plannings),
        )
        .route(
            "/plannings/:planning_id",
            get(plannings::get_planning).delete(plannings::delete_planning),
        )
        .route(
            "/plannings/:planning_id/shifts",
            post(plannings::add_shift),
        )
        .route(
            "/plannings/:planning_id/shifts/:shift_id",
            put(plannings::assign_shift).delete(plannings::remove_shift),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
