use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use super::AbsProductRepo;
use crate::constant::collection;
use crate::datastore::{AbstDocumentStore, AppDeleteInfo, AppUpdateInfo};
use crate::error::AppError;
use crate::model::{DocumentId, ProductModel, ProductUpdateModel};

const COLLECTION_LABEL: &str = collection::PRODUCT;

pub struct ProductDocRepo {
    datastore: Arc<Box<dyn AbstDocumentStore>>,
}

impl ProductDocRepo {
    pub async fn new(m: Arc<Box<dyn AbstDocumentStore>>) -> DefaultResult<Self, AppError> {
        m.create_collection(COLLECTION_LABEL).await?;
        Ok(Self { datastore: m })
    }
}

#[async_trait]
impl AbsProductRepo for ProductDocRepo {
    async fn create(&self, m: ProductModel) -> DefaultResult<ProductModel, AppError> {
        let content = m.to_document();
        self.datastore
            .insert(COLLECTION_LABEL, m.id, content)
            .await?;
        Ok(m)
    }

    async fn fetch_all(&self) -> DefaultResult<Vec<ProductModel>, AppError> {
        let rows = self.datastore.fetch_all(COLLECTION_LABEL).await?;
        rows.into_iter().map(ProductModel::try_from).collect()
    }

    async fn fetch(&self, id: DocumentId) -> DefaultResult<Option<ProductModel>, AppError> {
        let found = self.datastore.fetch_one(COLLECTION_LABEL, id).await?;
        found
            .map(|content| ProductModel::try_from((id, content)))
            .transpose()
    }

    async fn update(
        &self,
        id: DocumentId,
        m: ProductUpdateModel,
    ) -> DefaultResult<AppUpdateInfo, AppError> {
        let fields = m.to_document();
        self.datastore
            .update_fields(COLLECTION_LABEL, id, fields)
            .await
    }

    async fn delete(&self, id: DocumentId) -> DefaultResult<AppDeleteInfo, AppError> {
        self.datastore.delete(COLLECTION_LABEL, id).await
    }
} // end of impl AbsProductRepo for ProductDocRepo
