//! Single-page web UI: search form, selection list, prescription download.

mod error;
mod handlers;
mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use dashmap::DashMap;
use minijinja::Environment;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::error::MedFinderError;
use crate::sources::rxnorm::RxNormClient;
use session::SessionContext;

/// Sessions kept in memory at once; past this, the least-recently-touched
/// entry is dropped.
pub(crate) const MAX_SESSIONS: usize = 64;

/// Application state shared across all handlers. Record lists and rendered
/// files are keyed per session.
pub(crate) struct AppState {
    pub sessions: DashMap<Uuid, SessionContext>,
    pub rxnorm: RxNormClient,
    pub templates: Environment<'static>,
}

impl AppState {
    pub(crate) fn new(rxnorm: RxNormClient) -> Result<Self, MedFinderError> {
        let mut templates = Environment::new();
        templates.add_template("index.html", include_str!("templates/index.html"))?;
        Ok(Self {
            sessions: DashMap::new(),
            rxnorm,
            templates,
        })
    }

    /// Keeps the session map bounded. Called after every insert.
    pub(crate) fn evict_stale_sessions(&self) {
        while self.sessions.len() > MAX_SESSIONS {
            let stalest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().touched)
                .map(|entry| *entry.key());
            match stalest {
                Some(id) => {
                    self.sessions.remove(&id);
                }
                None => break,
            }
        }
    }
}

pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", post(handlers::search))
        .route("/render", post(handlers::render_prescription))
        .route("/download/{session}", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the web UI and serves it until the process is stopped.
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(RxNormClient::new()?)?);
    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("medfinder listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
