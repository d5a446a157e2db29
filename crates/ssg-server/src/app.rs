//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use ssg_site::LIVE_RELOAD_PATH;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::live_reload;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Every path except the live-reload endpoint is answered from the
/// current site snapshot.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new();

    // WebSocket for live reload
    if state.live_reload_enabled() {
        router = router.route(LIVE_RELOAD_PATH, get(live_reload::ws_handler));
    }

    let live_reload = state.live_reload_enabled();
    router
        .fallback(handlers::serve_node)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::security_headers(live_reload)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use ssg_site::{BuildOptions, Node};
    use tower::ServiceExt;

    use crate::routes::SiteSnapshot;
    use crate::routes::tests::{page, site};

    fn state(live_reload: bool) -> Arc<AppState> {
        let snapshot = SiteSnapshot::new(site(vec![
            Node::Directory {
                name: "content".to_owned(),
                children: vec![page("content/a.html", "<p>a</p>")],
            },
            Node::Directory {
                name: "themes".to_owned(),
                children: vec![Node::Static {
                    name: "themes/dark.css".to_owned(),
                    content: b"body{}".to_vec(),
                }],
            },
            page("index.html", "<p>home</p>"),
        ]))
        .unwrap();
        let options = BuildOptions {
            build_drafts: false,
            enable_hot_reloading: live_reload,
        };
        Arc::new(AppState::new("site".into(), options, snapshot))
    }

    async fn get_path(router: Router, path: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_serves_page_with_html_content_type() {
        let response = get_path(create_router(state(true)), "/content/a.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>a</p>");
    }

    #[tokio::test]
    async fn test_serves_static_file_with_guessed_type() {
        let response = get_path(create_router(state(true)), "/themes/dark.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let response = get_path(create_router(state(true)), "/").await;

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>home</p>");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let router = create_router(state(true));

        assert_eq!(get_path(router.clone(), "/missing.html").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get_path(router, "/content").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_live_reload_route_requires_upgrade() {
        let response = get_path(create_router(state(true)), LIVE_RELOAD_PATH).await;

        // a plain GET reaches the WebSocket handler and is rejected
        assert_ne!(response.status(), StatusCode::NOT_FOUND);
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_live_reload_route_absent_when_disabled() {
        let response = get_path(create_router(state(false)), LIVE_RELOAD_PATH).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_csp_follows_live_reload_setting() {
        let live = get_path(create_router(state(true)), "/").await;
        let plain = get_path(create_router(state(false)), "/").await;

        assert_eq!(
            live.headers()["content-security-policy"],
            security::content_security_policy(true)
        );
        assert_eq!(
            plain.headers()["content-security-policy"],
            security::content_security_policy(false)
        );
        assert_eq!(plain.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_requests_see_swapped_snapshot() {
        let state = state(true);
        let router = create_router(Arc::clone(&state));

        state.replace(SiteSnapshot::new(site(vec![page("index.html", "<p>v2</p>")])).unwrap());

        let response = get_path(router, "/").await;
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>v2</p>");
    }
}
