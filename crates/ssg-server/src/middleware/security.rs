//! Response headers for served pages.
//!
//! Every response carries `X-Content-Type-Options`, `X-Frame-Options` and a
//! Content-Security-Policy. The policy only admits inline scripts and
//! WebSocket connections while live reload is on, since the reload snippet
//! rendered into each page is the sole script the server itself injects.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::set_header::SetResponseHeaderLayer;

/// Policy used while pages embed the live-reload snippet.
const CSP_LIVE_RELOAD: &str = "default-src 'self'; \
                               script-src 'self' 'unsafe-inline'; \
                               style-src 'self' 'unsafe-inline'; \
                               font-src 'self' data:; \
                               img-src 'self' data: https:; \
                               connect-src 'self' ws: wss:; \
                               frame-ancestors 'none'";

/// Policy used when pages are served exactly as `ssg build` would write them.
const CSP_STATIC: &str = "default-src 'self'; \
                          script-src 'self'; \
                          style-src 'self' 'unsafe-inline'; \
                          font-src 'self' data:; \
                          img-src 'self' data: https:; \
                          connect-src 'self'; \
                          frame-ancestors 'none'";

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Layers applying every security header.
pub(crate) type SecurityLayers = Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Identity>>>;

pub(crate) fn content_security_policy(live_reload: bool) -> &'static str {
    if live_reload { CSP_LIVE_RELOAD } else { CSP_STATIC }
}

/// Build the header layers for a server with or without live reload.
pub(crate) fn security_headers(live_reload: bool) -> ServiceBuilder<SecurityLayers> {
    ServiceBuilder::new()
        .layer(header(
            "content-security-policy",
            content_security_policy(live_reload),
        ))
        .layer(header("x-content-type-options", "nosniff"))
        .layer(header("x-frame-options", "DENY"))
}

fn header(name: &'static str, value: &'static str) -> HeaderLayer {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_reload_policy_allows_reload_snippet() {
        let csp = content_security_policy(true);

        assert!(csp.contains("script-src 'self' 'unsafe-inline'"));
        assert!(csp.contains("connect-src 'self' ws: wss:"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn test_static_policy_forbids_inline_scripts() {
        let csp = content_security_policy(false);

        assert!(csp.contains("script-src 'self';"));
        assert!(!csp.contains("ws:"));
    }
}
