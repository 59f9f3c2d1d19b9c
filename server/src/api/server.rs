//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{devices, health, quotes, rankings, reports, users, votes};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::PostgresService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

/// All versioned resource routers, nested under `/api/v1`
fn v1_router(database: &Arc<PostgresService>) -> Router<()> {
    Router::new()
        .nest("/health", health::routes(database.clone()))
        .nest("/users", users::routes(database.clone()))
        .nest("/devices", devices::routes(database.clone()))
        .nest("/quotes", quotes::routes(database.clone()))
        .nest("/votes", votes::routes(database.clone()))
        .nest("/reports", reports::routes(database.clone()))
        .nest("/rankings", rankings::routes(database.clone()))
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);

        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until the shutdown signal fires, then hand `CoreApp` back for
    /// teardown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let router = Router::new()
            .nest("/api/v1", v1_router(&app.database))
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}
