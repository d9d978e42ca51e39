use std::io::ErrorKind;
use std::net::ToSocketAddrs;
use std::result::Result as DefaultResult;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::web::{welcome_handler, ApiDoc, ApiRouteTableType};
use crate::constant::api::web as WebConst;
use crate::error::{AppError, AppErrorCode};
use crate::AppSharedState;

pub type WebServiceRoute = Router<()>;

/// build the complete web service : resource routes nested under the API base
/// path, the welcome message at root path, and the generated API document.
/// Middleware layers are applied by callers
pub fn app_web_service(rtable: ApiRouteTableType, shr_state: AppSharedState) -> (WebServiceRoute, u16) {
    // the type parameters for shared state should be explicitly annotated,
    // this function creates a router first then specify the shared state later
    let mut router: Router<AppSharedState> = Router::new();
    let mut num_applied: u16 = 0;
    for (path, route) in rtable {
        router = router.route(path, route);
        num_applied += 1u16;
    }
    let router = Router::new()
        .route("/", get(welcome_handler))
        .nest(WebConst::API_BASE_PATH, router);
    // Axum converts a router to a leaf service ONLY when the type parameter `S`
    // in `Router` becomes empty tuple `()`, which means "state type that is
    // missing in the router"
    let router: WebServiceRoute = router
        .with_state(shr_state)
        .merge(SwaggerUi::new(WebConst::DOC_UI_PATH).url(WebConst::DOC_SPEC_PATH, ApiDoc::openapi()));
    (router, num_applied)
} // end of fn app_web_service

pub mod middleware {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::limit::RequestBodyLimitLayer;

    /// permissive cross-origin access, all origins / methods / headers
    pub fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    pub fn req_body_limit(limit: usize) -> RequestBodyLimitLayer {
        RequestBodyLimitLayer::new(limit)
    }
} // end of inner-module middleware

pub async fn net_listener(
    mut domain_host: String,
    port: u16,
) -> DefaultResult<TcpListener, AppError> {
    if !domain_host.contains(':') {
        domain_host += ":0";
    }
    let mut iterator = domain_host.to_socket_addrs().map_err(
        // IP not found after domain name resolution
        |e| AppError {
            detail: Some(e.to_string() + ", domain_host:" + &domain_host),
            code: AppErrorCode::IOerror(ErrorKind::AddrNotAvailable),
        },
    )?;
    loop {
        let mut addr = iterator.next().ok_or(AppError {
            detail: Some("failed to bound with all IPs".to_string()),
            code: AppErrorCode::IOerror(ErrorKind::AddrInUse),
        })?;
        addr.set_port(port);
        if let Ok(b) = TcpListener::bind(addr).await {
            break Ok(b);
        }
    } // end of loop
} // end of fn net_listener
