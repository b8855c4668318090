//! Application state and HTTP router construction.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::events::ReviewEventHub;
use crate::graphql::{self, BookshelfSchema};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub hub: ReviewEventHub,
    pub schema: BookshelfSchema,
}

impl AppState {
    /// Wire the schema to `db` and `hub`
    pub fn new(config: Arc<Config>, db: Database, hub: ReviewEventHub) -> Self {
        let schema = graphql::build_schema(db.clone(), hub.clone());
        Self {
            config,
            db,
            hub,
            schema,
        }
    }
}

/// Build the full Axum router: health routes, /graphql, /graphql/ws and layers.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .merge(graphql::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
