//! HTTP transport for microsvc. Maps HTTP requests to widget operations.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command`: dispatch a command. Body = JSON input, request headers → Session.
//!   Replies `{ "success": bool, "data": ... }`; a failed security check replies
//!   `403` with a plain-text body instead.
//! - `GET /widget?name=...`: a full page with one widget; query = directive attributes.
//! - `GET /inventory`: administrator listing of stored records.
//! - `GET /health`: health check returning `{ "ok": true, "commands": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! let service = Arc::new(microsvc::Service::new(widget));
//!
//! // Get the router to compose with other axum routes
//! let app = microsvc::router(service.clone());
//!
//! // Or serve directly
//! microsvc::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::error::HandlerError;
use super::service::Service;
use super::session::Session;
use crate::render::ViewConfig;
use crate::store::SettingsStore;

type Shared<S> = Arc<Service<S>>;

/// Build an axum `Router` serving the widget and its commands.
pub fn router<S: SettingsStore + 'static>(service: Shared<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/widget", get(widget_handler::<S>))
        .route("/inventory", get(inventory_handler::<S>))
        .route("/:command", post(command_handler::<S>))
        .with_state(service)
}

/// Serve the widget over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: SettingsStore + 'static>(
    service: Shared<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "chatbot instructions widget listening");
    axum::serve(listener, app).await
}

/// `GET /health`: returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<S: SettingsStore + 'static>(
    State(service): State<Shared<S>>,
) -> impl IntoResponse {
    let commands = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `GET /widget`: render one widget as a full page.
async fn widget_handler<S: SettingsStore + 'static>(
    State(service): State<Shared<S>>,
    headers: HeaderMap,
    Query(attributes): Query<Vec<(String, String)>>,
) -> Html<String> {
    let requester = session_from_headers(&headers).requester();
    let config = ViewConfig::from_attributes(attributes);
    Html(service.widget().render_page(&config, &requester))
}

/// `GET /inventory`: administrator listing; empty for everyone else.
async fn inventory_handler<S: SettingsStore + 'static>(
    State(service): State<Shared<S>>,
    headers: HeaderMap,
) -> Html<String> {
    let requester = session_from_headers(&headers).requester();
    Html(service.widget().inventory(&requester))
}

/// `POST /:command`: dispatch a command with JSON body and headers as session.
async fn command_handler<S: SettingsStore + 'static>(
    State(service): State<Shared<S>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session = session_from_headers(&headers);
    let result = serde_json::from_slice::<Value>(&body)
        .map_err(HandlerError::from)
        .and_then(|input| service.dispatch(&command, input, session));

    match result {
        Ok(value) => (StatusCode::OK, Json(json!({ "success": true, "data": value }))).into_response(),
        Err(e) if e.is_fatal() => (StatusCode::FORBIDDEN, e.to_string()).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = json!({ "success": false, "data": e.to_string() });
            (status, Json(body)).into_response()
        }
    }
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut vars = HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            vars.insert(name.as_str().to_string(), v.to_string());
        }
    }
    Session::from_map(vars)
}
