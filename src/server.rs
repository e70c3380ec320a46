// ABOUTME: HTTP server assembly: shared state, router wiring and the serve loop
// ABOUTME: Public page at /, admin panel under /admin, uploaded files under /static/uploads

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::admin::{admin_router, auth, login_router, require_admin};
use crate::config::Config;
use crate::site;
use crate::store::MediaStore;
use crate::uploads::UploadDir;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MediaStore,
    pub uploads: UploadDir,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.store.db_path())
            .field("uploads", &self.uploads.root())
            .finish()
    }
}

/// Prepare storage for serving: schema, admin seed, sample rows and the upload directory
pub fn bootstrap(config: Config) -> Result<AppState> {
    let store = MediaStore::new(&config.storage.database_path);
    let password_hash =
        auth::hash_password(&config.admin.password).context("Failed to hash admin password")?;
    store.bootstrap(&config.admin.username, &password_hash)?;

    let uploads = UploadDir::new(&config.storage.upload_dir);
    uploads.ensure()?;

    Ok(AppState {
        config: Arc::new(config),
        store,
        uploads,
    })
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.storage.max_upload_bytes;

    let admin = admin_router()
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(middleware::from_fn(require_admin));

    let sessions = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    Router::new()
        .route("/", get(site::index))
        .merge(login_router())
        .nest("/admin", admin)
        .nest_service("/static/uploads", ServeDir::new(state.uploads.root()))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bootstrap storage and serve until the process is stopped
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr();
    let state = bootstrap(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Media page listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server stopped unexpectedly")?;
    Ok(())
}
