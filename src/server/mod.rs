use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::data::{load_catalog, CatalogStore};
use crate::ledger::BuildLedger;

pub mod api;
pub mod routes;
pub mod static_files;

use routes::{route_request, HttpResponse};

/// Everything a request can see: the read-only catalog and the session's saved builds.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: CatalogStore,
    ledger: Mutex<BuildLedger>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: CatalogStore) -> Self {
        AppState {
            config,
            catalog,
            ledger: Mutex::new(BuildLedger::new()),
        }
    }

    pub fn ledger(&self) -> MutexGuard<'_, BuildLedger> {
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn run_server(config: AppConfig) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config))
}

pub async fn serve(config: AppConfig) -> std::io::Result<()> {
    let catalog = load_catalog(&config.data_dir).await;
    if catalog.is_empty() {
        tracing::warn!(data_dir = %config.data_dir.display(), "catalog is empty; every lookup will fail");
    }
    let bind_addr = config.bind_addr.clone();
    let app = router(Arc::new(AppState::new(config, catalog)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("skillcalc server listening on http://{bind_addr}");
    axum::serve(listener, app).await
}

/// Image assets come from `ServeDir`; everything else goes through [`route_request`].
pub fn router(state: Arc<AppState>) -> Router {
    let resources = state.config.frontend_dir.join("resources");
    Router::new()
        .nest_service("/resources", ServeDir::new(resources))
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    route_request(&state, method.as_str(), path, &body).into_response()
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], Body::from(self.body)).into_response()
    }
}
