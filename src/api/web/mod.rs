use std::result::Result as DefaultResult;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::{
    header as HttpHeader, HeaderMap as HttpHeaderMap, HeaderValue as HttpHeaderValue,
    StatusCode as HttpStatusCode,
};
use axum::response::IntoResponse;
use axum::routing::{get, MethodRouter};
use serde::Serialize;
use utoipa::OpenApi;

use crate::constant::{self as AppConst, api::web as WebConst};
use crate::datastore::{AppDeleteInfo, AppUpdateInfo};
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::{AppSharedState, WebApiPath};

pub mod dto;
mod order;
mod product;

use dto::{
    DeleteAckDto, ErrorRespDto, OrderDto, OrderReqDto, ProductDto, ProductReqDto, UpdateAckDto,
};

pub type ApiRouteType = MethodRouter<AppSharedState>;
pub type ApiRouteTableType = Vec<(WebApiPath, ApiRouteType)>;

#[derive(OpenApi)]
#[openapi(
    info(title = "E-commerce Platform", version = "1.0.0"),
    paths(
        product::create_handler,
        product::list_handler,
        product::fetch_handler,
        product::update_handler,
        product::delete_handler,
        order::create_handler,
        order::list_handler,
        order::fetch_handler,
        order::update_handler,
        order::delete_handler,
    ),
    components(schemas(
        ProductReqDto,
        ProductDto,
        OrderReqDto,
        OrderDto,
        UpdateAckDto,
        DeleteAckDto,
        ErrorRespDto
    )),
    tags(
        (name = "product", description = "product endpoints"),
        (name = "order", description = "order endpoints")
    )
)]
pub struct ApiDoc;

/// routes relative to the API base path, each path bundles all the
/// methods applied to it
pub fn route_table() -> ApiRouteTableType {
    vec![
        (
            WebConst::PRODUCT_COLLECTION,
            get(product::list_handler).post(product::create_handler),
        ),
        (
            WebConst::PRODUCT_SINGLE,
            get(product::fetch_handler)
                .put(product::update_handler)
                .delete(product::delete_handler),
        ),
        (
            WebConst::ORDER_COLLECTION,
            get(order::list_handler).post(order::create_handler),
        ),
        (
            WebConst::ORDER_SINGLE,
            get(order::fetch_handler)
                .put(order::update_handler)
                .delete(order::delete_handler),
        ),
    ]
}

pub(crate) async fn welcome_handler() -> &'static str {
    AppConst::app_meta::WELCOME_MSG
}

impl From<AppUpdateInfo> for UpdateAckDto {
    fn from(value: AppUpdateInfo) -> Self {
        UpdateAckDto {
            acknowledged: true,
            matchedCount: value.matched,
            modifiedCount: value.modified,
            upsertedId: None,
            upsertedCount: 0,
        }
    }
}

impl From<AppDeleteInfo> for DeleteAckDto {
    fn from(value: AppDeleteInfo) -> Self {
        DeleteAckDto {
            acknowledged: true,
            deletedCount: value.deleted,
        }
    }
}

fn json_rejection_error(e: JsonRejection) -> AppError {
    AppError {
        code: AppErrorCode::InvalidJsonFormat,
        detail: Some(e.body_text()),
    }
}

fn error_status(code: &AppErrorCode) -> HttpStatusCode {
    match code {
        AppErrorCode::InvalidInput
        | AppErrorCode::InvalidJsonFormat
        | AppErrorCode::InvalidDocumentId => HttpStatusCode::BAD_REQUEST,
        AppErrorCode::ExceedingMaxLimit => HttpStatusCode::INSUFFICIENT_STORAGE,
        AppErrorCode::MissingDataStore | AppErrorCode::RemoteDbServerFailure => {
            HttpStatusCode::SERVICE_UNAVAILABLE
        }
        _others => HttpStatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// convert the result of a single data-access operation to http response,
/// every error ends up in JSON body `{"message": ...}`
fn presenter<T: Serialize>(
    result: DefaultResult<T, AppError>,
    logctx: Arc<AppLogContext>,
) -> impl IntoResponse {
    let resp_ctype_val = HttpHeaderValue::from_static(AppConst::HTTP_CONTENT_TYPE_JSON);
    let mut hdr_map = HttpHeaderMap::new();
    hdr_map.insert(HttpHeader::CONTENT_TYPE, resp_ctype_val);
    let (status, serial_resp_body) = match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(s) => (HttpStatusCode::OK, s),
            Err(e) => {
                app_log_event!(logctx, AppLogLevel::ERROR, "serialization-failure: {}", e);
                (
                    HttpStatusCode::INTERNAL_SERVER_ERROR,
                    r#"{"message":"serialization-failure"}"#.to_string(),
                )
            }
        },
        Err(e) => {
            let status = error_status(&e.code);
            let message = if status.is_server_error() {
                app_log_event!(logctx, AppLogLevel::ERROR, "{}", e);
                match e.code {
                    AppErrorCode::MissingDataStore | AppErrorCode::RemoteDbServerFailure => {
                        e.detail.unwrap_or_default()
                    }
                    _others => "internal-error".to_string(),
                } // do not expose internal detail of other server errors
            } else {
                app_log_event!(logctx, AppLogLevel::DEBUG, "{}", e);
                e.detail.unwrap_or_default()
            };
            let body = ErrorRespDto { message };
            let serial = serde_json::to_string(&body)
                .unwrap_or(r#"{"message":"internal-error"}"#.to_string());
            (status, serial)
        }
    };
    (status, hdr_map, serial_resp_body)
} // end of fn presenter
