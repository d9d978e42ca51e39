use std::result::Result as DefaultResult;
use std::str::FromStr;

use axum::debug_handler;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json as ExtractJson, Path as ExtractPath, State as ExtractState};
use axum::response::IntoResponse;

use super::dto::{DeleteAckDto, ProductDto, ProductReqDto, UpdateAckDto};
use super::{json_rejection_error, presenter};
use crate::datastore::{AppDeleteInfo, AppUpdateInfo};
use crate::error::AppError;
use crate::model::{DocumentId, ProductModel, ProductUpdateModel};
use crate::repository::app_repo_product;
use crate::AppSharedState;

type ReqBody = DefaultResult<ExtractJson<ProductReqDto>, JsonRejection>;

#[utoipa::path(
    post,
    path = "/api/product",
    tag = "product",
    request_body = ProductReqDto,
    responses(
        (status = 200, description = "new product created", body = ProductDto),
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
    presenter(result.map(ProductDto::from), logctx)
}

async fn try_create(
    appstate: AppSharedState,
    req_body: ReqBody,
) -> DefaultResult<ProductModel, AppError> {
    let ExtractJson(req) = req_body.map_err(json_rejection_error)?;
    let model = ProductModel::try_from(req)?;
    let repo = app_repo_product(appstate.datastore()).await?;
    repo.create(model).await
}

#[utoipa::path(
    get,
    path = "/api/product",
    tag = "product",
    responses(
        (status = 200, description = "all products", body = [ProductDto]),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = match app_repo_product(appstate.datastore()).await {
        Ok(repo) => repo.fetch_all().await,
        Err(e) => Err(e),
    };
    let result = result.map(|ms| ms.into_iter().map(ProductDto::from).collect::<Vec<_>>());
    presenter(result, logctx)
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    tag = "product",
    params(("id" = String, Path, description = "the product id")),
    responses(
        (status = 200, description = "a product, `null` if not exists", body = ProductDto),
        (status = 400, description = "malformed product id", body = ErrorRespDto),
    )
)]
#[debug_handler(state = AppSharedState)]
pub(super) async fn fetch_handler(
    ExtractPath(id): ExtractPath<String>,
    ExtractState(appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let logctx = appstate.log_context().clone();
    let result = try_fetch(appstate, id).await;
    presenter(result.map(|m| m.map(ProductDto::from)), logctx)
}

async fn try_fetch(
    appstate: AppSharedState,
    id: String,
) -> DefaultResult<Option<ProductModel>, AppError> {
    let id = DocumentId::from_str(id.as_str())?;
    let repo = app_repo_product(appstate.datastore()).await?;
    repo.fetch(id).await
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    tag = "product",
    params(("id" = String, Path, description = "the product id")),
    request_body = ProductReqDto,
    responses(
        (status = 200, description = "product updated, zero counts if not exists", body = UpdateAckDto),
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

async fn try_update(
    appstate: AppSharedState,
    id: String,
    req_body: ReqBody,
) -> DefaultResult<AppUpdateInfo, AppError> {
    let id = DocumentId::from_str(id.as_str())?;
    let ExtractJson(req) = req_body.map_err(json_rejection_error)?;
    let model = ProductUpdateModel::try_from(req)?;
    let repo = app_repo_product(appstate.datastore()).await?;
    repo.update(id, model).await
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    tag = "product",
    params(("id" = String, Path, description = "the product id")),
    responses(
        (status = 200, description = "product deleted, zero count if not exists", body = DeleteAckDto),
        (status = 400, description = "malformed product id", body = ErrorRespDto),
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
    let repo = app_repo_product(appstate.datastore()).await?;
    repo.delete(id).await
}
