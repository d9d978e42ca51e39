use std::result::Result as DefaultResult;
use std::str::FromStr;

use axum::debug_handler;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json as ExtractJson, Path as ExtractPath, State as ExtractState};
use axum::response::IntoResponse;

use super::dto::{DeleteAckDto, OrderDto, OrderReqDto, UpdateAckDto};
use super::{json_rejection_error, presenter};
use crate::datastore::{AppDeleteInfo, AppUpdateInfo};
use crate::error::AppError;
use crate::model::{DocumentId, OrderModel, OrderUpdateModel};
use crate::repository::app_repo_order;
use crate::AppSharedState;

type ReqBody = DefaultResult<ExtractJson<OrderReqDto>, JsonRejection>;

#[utoipa::path(
    post,
    path = "/api/order",
    tag = "order",
    request_body = OrderReqDto,
    responses(
        (status = 200, description = "new order created", body = OrderDto),
        (status = 400, description = "missing or invalid fields", body = ErrorRespDto),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn create_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
    req_body: ReqBody,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = try_create(appstate, req_body).await;
    presenter(result.map(OrderDto::from), logctx)
}

async fn try_create(
    appstate: AppSharedState,
    req_body: ReqBody,
) -> DefaultResult<OrderModel, AppError> {
    let ExtractJson(req) = req_body.map_err(json_rejection_error)?;
    let model = OrderModel::try_from(req)?;
    let repo = app_repo_order(appstate.datastore()).await?;
    repo.create(model).await
}

#[utoipa::path(
    get,
    path = "/api/order",
    tag = "order",
    responses(
        (status = 200, description = "all orders", body = [OrderDto]),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = match app_repo_order(appstate.datastore()).await {
        Ok(repo) => repo.fetch_all().await,
        Err(e) => Err(e),
    };
    let result = result.map(|ms| ms.into_iter().map(OrderDto::from).collect::<Vec<_>>());
    presenter(result, logctx)
}

#[utoipa::path(
    get,
    path = "/api/order/{id}",
    tag = "order",
    params(("id" = String, Path, description = "the order id")),
    responses(
        (status = 200, description = "an order, `null` if not exists", body = OrderDto),
        (status = 400, description = "malformed order id", body = ErrorRespDto),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn fetch_handler(
    ExtractPath(id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = try_fetch(appstate, id).await;
    presenter(result.map(|m| m.map(OrderDto::from)), logctx)
}

async fn try_fetch(
    appstate: AppSharedState,
    id: String,
) -> DefaultResult<Option<OrderModel>, AppError> {
    let id = DocumentId::from_str(id.as_str())?;
    let repo = app_repo_order(appstate.datastore()).await?;
    repo.fetch(id).await
}

#[utoipa::path(
    put,
    path = "/api/order/{id}",
    tag = "order",
    params(("id" = String, Path, description = "the order id")),
    request_body = OrderReqDto,
    responses(
        (status = 200, description = "order updated, zero counts if not exists", body = UpdateAckDto),
        (status = 400, description = "malformed id or invalid fields", body = ErrorRespDto),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn update_handler(
    ExtractPath(id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
    req_body: ReqBody,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = try_update(appstate, id, req_body).await;
    presenter(result.map(UpdateAckDto::from), logctx)
}

// fields applied are the ones the order schema actually has, the reference to
// product is not checked
async fn try_update(
    appstate: AppSharedState,
    id: String,
    req_body: ReqBody,
) -> DefaultResult<AppUpdateInfo, AppError> {
    let id = DocumentId::from_str(id.as_str())?;
    let ExtractJson(req) = req_body.map_err(json_rejection_error)?;
    let model = OrderUpdateModel::try_from(req)?;
    let repo = app_repo_order(appstate.datastore()).await?;
    repo.update(id, model).await
}

#[utoipa::path(
    delete,
    path = "/api/order/{id}",
    tag = "order",
    params(("id" = String, Path, description = "the order id")),
    responses(
        (status = 200, description = "order deleted, zero count if not exists", body = DeleteAckDto),
        (status = 400, description = "malformed order id", body = ErrorRespDto),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn delete_handler(
    ExtractPath(id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = try_delete(appstate, id).await;
    presenter(result.map(DeleteAckDto::from), logctx)
}

async fn try_delete(appstate: AppSharedState, id: String) -> DefaultResult<AppDeleteInfo, AppError> {
    let id = DocumentId::from_str(id.as_str())?;
    let repo = app_repo_order(appstate.datastore()).await?;
    repo.delete(id).await
}
