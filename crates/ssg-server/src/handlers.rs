//! Page handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

/// Serve the node at the request path from the current snapshot.
pub(crate) async fn serve_node(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let snapshot = state.snapshot();
    let route = snapshot
        .resolve(uri.path())
        .ok_or_else(|| ServerError::NotFound(uri.path().to_owned()))?;

    Ok((
        [(header::CONTENT_TYPE, route.content_type)],
        route.content.clone(),
    )
        .into_response())
}
