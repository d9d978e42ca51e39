use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use super::AbsOrderRepo;
use crate::constant::collection;
use crate::datastore::{AbstDocumentStore, AppDeleteInfo, AppUpdateInfo};
use crate::error::AppError;
use crate::model::{DocumentId, OrderModel, OrderUpdateModel};

const COLLECTION_LABEL: &str = collection::ORDER;

pub struct OrderDocRepo {
    datastore: Arc<Box<dyn AbstDocumentStore>>,
}

impl OrderDocRepo {
    pub async fn new(m: Arc<Box<dyn AbstDocumentStore>>) -> DefaultResult<Self, AppError> {
        m.create_collection(COLLECTION_LABEL).await?;
        Ok(Self { datastore: m })
    }
}

#[async_trait]
impl AbsOrderRepo for OrderDocRepo {
    async fn create(&self, m: OrderModel) -> DefaultResult<OrderModel, AppError> {
        let content = m.to_document();
        self.datastore
            .insert(COLLECTION_LABEL, m.id, content)
            .await?;
        Ok(m)
    }

    async fn fetch_all(&self) -> DefaultResult<Vec<OrderModel>, AppError> {
        let rows = self.datastore.fetch_all(COLLECTION_LABEL).await?;
        rows.into_iter().map(OrderModel::try_from).collect()
    }

    async fn fetch(&self, id: DocumentId) -> DefaultResult<Option<OrderModel>, AppError> {
        let found = self.datastore.fetch_one(COLLECTION_LABEL, id).await?;
        found
            .map(|content| OrderModel::try_from((id, content)))
            .transpose()
    }

    // the product referenced by the order is not verified
    async fn update(
        &self,
        id: DocumentId,
        m: OrderUpdateModel,
    ) -> DefaultResult<AppUpdateInfo, AppError> {
        self.datastore
            .update_fields(COLLECTION_LABEL, id, m.to_document())
            .await
    }

    async fn delete(&self, id: DocumentId) -> DefaultResult<AppDeleteInfo, AppError> {
        self.datastore.delete(COLLECTION_LABEL, id).await
    }
} // end of impl AbsOrderRepo for OrderDocRepo
