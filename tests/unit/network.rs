use std::io::ErrorKind;

use axum::body::Body as AxumBody;
use axum::http::{header as HttpHeader, StatusCode as HttpStatusCode};
use http_body_util::BodyExt;
use hyper::Request;
use tower::{Service, ServiceBuilder};

use storefront::api::web::route_table;
use storefront::error::AppErrorCode;
use storefront::network::{app_web_service, middleware, net_listener};

use crate::ut_setup_share_state;

#[tokio::test]
async fn app_web_service_ok() {
    let shr_state = ut_setup_share_state().await;
    let (mut service, num_routes) = app_web_service(route_table(), shr_state);
    assert_eq!(num_routes, 4);
    let req = Request::builder()
        .method("GET")
        .uri("/")
        .body(AxumBody::empty())
        .unwrap();
    let result = service.call(req).await;
    assert!(result.is_ok());
    let r = result.unwrap();
    assert_eq!(r.status(), HttpStatusCode::OK);
    let rawdata = r.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(rawdata.as_ref(), b"Welcome to my API");
}

#[tokio::test]
async fn app_web_service_unknown_path() {
    let shr_state = ut_setup_share_state().await;
    let (mut service, _num_routes) = app_web_service(route_table(), shr_state);
    let req = Request::builder()
        .method("GET")
        .uri("/api/customer")
        .body(AxumBody::empty())
        .unwrap();
    let r = service.call(req).await.unwrap();
    assert_eq!(r.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_document_served() {
    let shr_state = ut_setup_share_state().await;
    let (mut service, _num_routes) = app_web_service(route_table(), shr_state);
    let req = Request::builder()
        .method("GET")
        .uri("/api-docs/openapi.json")
        .body(AxumBody::empty())
        .unwrap();
    let r = service.call(req).await.unwrap();
    assert_eq!(r.status(), HttpStatusCode::OK);
    let rawdata = r.into_body().collect().await.unwrap().to_bytes();
    let doc = serde_json::from_slice::<serde_json::Value>(rawdata.as_ref()).unwrap();
    let paths = doc.get("paths").unwrap().as_object().unwrap();
    assert_eq!(paths.len(), 4);
    let single = paths.get("/api/product/{id}").unwrap();
    for method in ["get", "put", "delete"] {
        assert!(single.get(method).is_some());
    }
    let collection = paths.get("/api/order").unwrap();
    for method in ["get", "post"] {
        assert!(collection.get(method).is_some());
    }
    let title = doc.pointer("/info/title").unwrap();
    assert_eq!(title.as_str(), Some("E-commerce Platform"));
}

#[tokio::test]
async fn net_server_listener_ok() {
    let result = net_listener("localhost".to_string(), 0).await;
    assert!(result.is_ok());
    let result = net_listener("nonexist.org.12345".to_string(), 0).await;
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::IOerror(ErrorKind::AddrNotAvailable));
    }
}

#[tokio::test]
async fn middleware_cors_preflight() {
    let shr_state = ut_setup_share_state().await;
    let (service, _num_routes) = app_web_service(route_table(), shr_state);
    let middlewares = ServiceBuilder::new().layer(middleware::cors());
    let mut service = service.layer(middlewares);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/product")
        .header(HttpHeader::ORIGIN, "http://shop.example.com")
        .header(HttpHeader::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(AxumBody::empty())
        .unwrap();
    let r = service.call(req).await.unwrap();
    assert_eq!(r.status(), HttpStatusCode::OK);
    let allowed = r.headers().get(HttpHeader::ACCESS_CONTROL_ALLOW_ORIGIN);
    assert_eq!(allowed.unwrap().to_str().unwrap(), "*");

    let req = Request::builder()
        .method("GET")
        .uri("/api/order")
        .header(HttpHeader::ORIGIN, "http://shop.example.com")
        .body(AxumBody::empty())
        .unwrap();
    let r = service.call(req).await.unwrap();
    assert_eq!(r.status(), HttpStatusCode::OK);
    let allowed = r.headers().get(HttpHeader::ACCESS_CONTROL_ALLOW_ORIGIN);
    assert_eq!(allowed.unwrap().to_str().unwrap(), "*");
}

#[tokio::test]
async fn middleware_req_body_limit() {
    let shr_state = ut_setup_share_state().await;
    let (service, _num_routes) = app_web_service(route_table(), shr_state);
    let reqlm = middleware::req_body_limit(8);
    let middlewares = ServiceBuilder::new().layer(reqlm);
    let mut service = service.layer(middlewares);
    let body = r#"{"name":"pc","value":5000}"#;
    let req = Request::builder()
        .method("POST")
        .uri("/api/product")
        .header(HttpHeader::CONTENT_TYPE, "application/json")
        .header(HttpHeader::CONTENT_LENGTH, body.len())
        .body(AxumBody::from(body))
        .unwrap();
    let r = service.call(req).await.unwrap();
    assert_eq!(r.status(), HttpStatusCode::PAYLOAD_TOO_LARGE);
}
