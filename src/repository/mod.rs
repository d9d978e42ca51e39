use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::datastore::{AppDeleteInfo, AppUpdateInfo};
use crate::error::{AppError, AppErrorCode};
use crate::model::{DocumentId, OrderModel, OrderUpdateModel, ProductModel, ProductUpdateModel};
use crate::AppDataStoreContext;

mod order;
mod product;

pub use order::OrderDocRepo;
pub use product::ProductDocRepo;

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different threads
// , it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsProductRepo: Sync + Send {
    async fn create(&self, m: ProductModel) -> DefaultResult<ProductModel, AppError>;

    async fn fetch_all(&self) -> DefaultResult<Vec<ProductModel>, AppError>;

    async fn fetch(&self, id: DocumentId) -> DefaultResult<Option<ProductModel>, AppError>;

    async fn update(
        &self,
        id: DocumentId,
        m: ProductUpdateModel,
    ) -> DefaultResult<AppUpdateInfo, AppError>;

    async fn delete(&self, id: DocumentId) -> DefaultResult<AppDeleteInfo, AppError>;
}

#[async_trait]
pub trait AbsOrderRepo: Sync + Send {
    async fn create(&self, m: OrderModel) -> DefaultResult<OrderModel, AppError>;

    async fn fetch_all(&self) -> DefaultResult<Vec<OrderModel>, AppError>;

    async fn fetch(&self, id: DocumentId) -> DefaultResult<Option<OrderModel>, AppError>;

    async fn update(
        &self,
        id: DocumentId,
        m: OrderUpdateModel,
    ) -> DefaultResult<AppUpdateInfo, AppError>;

    async fn delete(&self, id: DocumentId) -> DefaultResult<AppDeleteInfo, AppError>;
}

fn _missing_datastore() -> AppError {
    AppError {
        code: AppErrorCode::MissingDataStore,
        detail: Some("document-store-unavailable".to_string()),
    }
}

pub async fn app_repo_product(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsProductRepo>, AppError> {
    if let Some(store) = ds.documents.as_ref() {
        let obj = ProductDocRepo::new(store.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(_missing_datastore())
    }
}

pub async fn app_repo_order(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsOrderRepo>, AppError> {
    if let Some(store) = ds.documents.as_ref() {
        let obj = OrderDocRepo::new(store.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(_missing_datastore())
    }
}
