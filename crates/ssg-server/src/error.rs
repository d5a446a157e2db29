//! Error types for the dev server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No node is served at the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A top-level node would shadow the live-reload endpoint.
    #[error("{0} collides with the reserved /ws path used for live reload")]
    ReservedPath(String),

    /// Site build failed.
    #[error(transparent)]
    Build(#[from] ssg_site::BuildError),

    /// Filesystem watcher could not be started.
    #[error("Failed to watch source directory: {0}")]
    Watch(#[from] notify::Error),

    /// Rebuild task panicked or was cancelled.
    #[error("Rebuild task failed: {0}")]
    Rebuild(#[from] tokio::task::JoinError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ReservedPath(_)
            | Self::Build(_)
            | Self::Watch(_)
            | Self::Rebuild(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_response() {
        let response = ServerError::NotFound("/missing.html".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_reserved_path_message() {
        let err = ServerError::ReservedPath("ws".to_owned());

        assert_eq!(
            err.to_string(),
            "ws collides with the reserved /ws path used for live reload"
        );
    }
}
