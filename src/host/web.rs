//! Browser host: publishes rendered markup through a watch channel and serves
//! it, together with a small shell page, over HTTP.
//!
//! * `GET /` returns the shell. It shows a loading indicator until the first
//!   snapshot with `ready: true` arrives.
//! * `GET /view` returns the latest [`Snapshot`] as JSON.
//! * `POST /action` takes `{"action": "...", "arg": "..."}`, waits for the
//!   controller to handle it, and answers with the new snapshot.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::event::Action;
use crate::host::Host;
use crate::runtime::{RuntimeClosed, RuntimeHandle};

#[derive(Embed)]
#[folder = "assets/web/"]
struct WebAssets;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Everything the browser needs to draw the current screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Bumped on every change so clients can skip redundant redraws.
    pub version: u64,
    pub markup: String,
    /// False until the controller has mounted.
    pub ready: bool,
    pub notice: Option<Notice>,
}

pub struct WatchHost {
    tx: watch::Sender<Snapshot>,
}

impl WatchHost {
    pub fn new() -> (Self, watch::Receiver<Snapshot>) {
        let (tx, rx) = watch::channel(Snapshot::default());
        (Self { tx }, rx)
    }
}

impl Host for WatchHost {
    fn mount(&mut self, markup: String) {
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.markup = markup;
        });
    }

    fn hide_loading(&mut self) {
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.ready = true;
        });
    }

    fn notify(&mut self, message: &str) {
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            let id = snapshot.notice.as_ref().map_or(1, |n| n.id + 1);
            snapshot.notice = Some(Notice {
                id,
                message: message.to_string(),
            });
        });
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),

    #[error(transparent)]
    Closed(#[from] RuntimeClosed),

    #[error("missing asset {0}")]
    MissingAsset(&'static str),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            WebError::Closed(_) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::MissingAsset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            WebError::UnknownAction(_) => "unknown_action",
            WebError::Closed(_) => "runtime_closed",
            WebError::MissingAsset(_) => "missing_asset",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub arg: Option<String>,
}

#[derive(Clone)]
struct WebState {
    runtime: RuntimeHandle,
    view: watch::Receiver<Snapshot>,
}

pub fn build_router(runtime: RuntimeHandle, view: watch::Receiver<Snapshot>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app.css", get(stylesheet))
        .route("/view", get(current_view))
        .route("/action", post(perform_action))
        .with_state(WebState { runtime, view })
}

fn asset(name: &'static str) -> Result<Vec<u8>, WebError> {
    WebAssets::get(name)
        .map(|file| file.data.into_owned())
        .ok_or(WebError::MissingAsset(name))
}

async fn index() -> Result<Html<Vec<u8>>, WebError> {
    Ok(Html(asset("index.html")?))
}

async fn stylesheet() -> Result<Response, WebError> {
    let css = asset("app.css")?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response())
}

async fn current_view(State(state): State<WebState>) -> Json<Snapshot> {
    Json(state.view.borrow().clone())
}

async fn perform_action(
    State(state): State<WebState>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<Snapshot>, WebError> {
    let action = Action::parse(&request.action, request.arg.as_deref())
        .ok_or_else(|| WebError::UnknownAction(request.action.clone()))?;
    state.runtime.dispatch(action).await?;
    Ok(Json(state.view.borrow().clone()))
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Serving lessons on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_host_publishes_changes() {
        let (mut host, rx) = WatchHost::new();
        assert!(!rx.borrow().ready);

        host.mount("<p>one</p>".to_string());
        host.hide_loading();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.markup, "<p>one</p>");
        assert!(snapshot.ready);
        assert_eq!(snapshot.version, 2);
    }

    #[test]
    fn test_notices_get_fresh_ids() {
        let (mut host, rx) = WatchHost::new();
        host.notify("first");
        host.notify("second");
        let notice = rx.borrow().notice.clone().unwrap();
        assert_eq!(notice.id, 2);
        assert_eq!(notice.message, "second");
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            WebError::UnknownAction("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::Closed(RuntimeClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_shell_is_embedded() {
        let shell = String::from_utf8(asset("index.html").unwrap()).unwrap();
        assert!(shell.contains("id=\"app\""));
        assert!(shell.contains("/action"));
        assert!(asset("app.css").is_ok());
    }
}
