use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{
        Method, StatusCode, Uri,
        header::{CONTENT_TYPE, LOCATION},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::client::Relay;
use crate::config::HttpSettings;
use crate::utils::error::{AppError, RelayError};

/// Shared, read-only state for every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    settings: Arc<HttpSettings>,
    relay: Relay,
}

impl AppState {
    pub fn new(settings: HttpSettings, relay: Relay) -> Self {
        Self {
            settings: Arc::new(settings),
            relay,
        }
    }

    fn root(&self) -> &Path {
        Path::new(&self.settings.root)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/message", get(message_handler).post(submit_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Serves the web front on an already bound listener.
pub async fn start_http_server(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    info!("Web front listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await
}

async fn index_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    send_html_file(&state, &state.settings.index_page, StatusCode::OK).await
}

async fn message_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    send_html_file(&state, &state.settings.message_page, StatusCode::OK).await
}

/// Forwards the body to the store server and sends the browser home.
///
/// A transport error still redirects, the submission is fire-and-forget. Only
/// a missing acknowledgment turns into an error response.
async fn submit_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    match state.relay.send(&body).await {
        Ok(_) => {}
        Err(RelayError::Io(e)) => error!("Unexpected error on socket client send: {e}"),
        Err(RelayError::Timeout(waited)) => return Err(AppError::RelayTimeout(waited)),
    }

    Ok((StatusCode::FOUND, [(LOCATION, "/")]).into_response())
}

async fn fallback_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, AppError> {
    match method {
        Method::GET => send_static(&state, uri.path()).await,
        Method::POST => submit_handler(State(state), body).await,
        _ => Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
    }
}

async fn send_html_file(
    state: &AppState,
    filename: &str,
    status: StatusCode,
) -> Result<Response, AppError> {
    let path = state.root().join(filename);
    let bytes = tokio::fs::read(&path).await.map_err(|source| AppError::Page {
        path: path.display().to_string(),
        source,
    })?;

    Ok((status, [(CONTENT_TYPE, "text/html")], bytes).into_response())
}

async fn send_static(state: &AppState, uri_path: &str) -> Result<Response, AppError> {
    let Some(path) = resolve_static(state.root(), uri_path) else {
        warn!("Rejected static path {uri_path}");
        return send_html_file(state, &state.settings.error_page, StatusCode::NOT_FOUND).await;
    };

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return send_html_file(state, &state.settings.error_page, StatusCode::NOT_FOUND).await;
    }

    let bytes = tokio::fs::read(&path).await.map_err(|source| AppError::Page {
        path: path.display().to_string(),
        source,
    })?;
    let content_type = mime_guess::from_path(&path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "text/plain".to_string());

    Ok((StatusCode::OK, [(CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Maps a request path onto a file below `root`. Anything that could step
/// outside of it (`..`, absolute or prefixed components) yields `None`.
fn resolve_static(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let relative = Path::new(uri_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}
