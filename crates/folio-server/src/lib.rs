//! Folio web server
//!
//! Thin HTTP shell over [`folio_core::projects::ProjectService`]: page
//! handlers, HTML views, static assets, and request tracing.

pub mod assets;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod views;

use std::path::PathBuf;

use axum::Router;
use axum::routing::{get, post};
use folio_core::config::Config;
use folio_core::projects::{ProjectRegistry, ProjectService, demo_projects};

pub use error::AppError;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub projects: ProjectService,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(projects: ProjectService, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            projects,
            public_dir: public_dir.into(),
        }
    }

    /// Build state from configuration, seeding the demo projects if enabled
    pub fn from_config(config: &Config) -> folio_core::Result<Self> {
        let registry = if config.registry.seed_demo_projects {
            ProjectRegistry::with_projects(demo_projects()?)
        } else {
            ProjectRegistry::new()
        };

        Ok(Self::new(
            ProjectService::with_registry(registry),
            config.server.public_dir.clone(),
        ))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/contact", get(handlers::contact))
        .route("/project", get(handlers::project_form))
        .route("/project/create", post(handlers::create_project))
        .route("/project/update/:id", post(handlers::submit_update))
        .route("/detail-project/:index", get(handlers::project_detail))
        .route("/update-project/:index", get(handlers::update_form))
        .route("/delete-project/:index", get(handlers::delete_project))
        .route("/public/*path", get(assets::public_asset))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(
            middleware::request_tracing_middleware,
        ))
        .with_state(state)
}
