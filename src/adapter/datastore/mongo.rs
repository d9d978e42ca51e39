use std::result::Result as DefaultResult;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value as JsnVal;

use super::{AbstDocumentStore, AppDeleteInfo, AppDocument, AppUpdateInfo, DocumentId};
use crate::config::AppMongoDbCfg;
use crate::constant::{app_meta, default_cfg, doc_field};
use crate::error::{AppError, AppErrorCode};

pub struct AppMongoDbStore {
    alias: String,
    db: Database,
}

impl AppMongoDbStore {
    /// the driver connects lazily, this function only parses the connection
    /// string and sets up the client, see `ping()` for connectivity check
    pub async fn try_build(cfg: &AppMongoDbCfg) -> DefaultResult<Self, AppError> {
        let mut opts = ClientOptions::parse(cfg.uri.as_str()).await?;
        opts.app_name = Some(app_meta::LABAL.to_string());
        let db_name = cfg
            .db_name
            .clone()
            .or(opts.default_database.clone())
            .unwrap_or(default_cfg::MONGODB_DATABASE.to_string());
        let client = Client::with_options(opts)?;
        let db = client.database(db_name.as_str());
        Ok(Self {
            alias: format!("MongoDB ({}, database:{})", cfg.alias, db_name),
            db,
        })
    }

    fn collection(&self, label: &str) -> Collection<Document> {
        self.db.collection::<Document>(label)
    }

    fn id_filter(id: DocumentId) -> Document {
        doc! {"_id": id.object_id()}
    }
} // end of impl AppMongoDbStore

fn to_bson_document(content: AppDocument) -> DefaultResult<Document, AppError> {
    bson::to_document(&content).map_err(|e| AppError {
        code: AppErrorCode::InvalidInput,
        detail: Some(e.to_string()),
    })
}

fn from_bson_document(mut raw: Document) -> DefaultResult<(DocumentId, AppDocument), AppError> {
    let id = match raw.remove(doc_field::ID) {
        Some(Bson::ObjectId(oid)) => DocumentId::from(oid),
        _others => {
            return Err(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some("document-id-missing-or-not-object-id".to_string()),
            })
        }
    };
    match Bson::Document(raw).into_relaxed_extjson() {
        JsnVal::Object(content) => Ok((id, content)),
        _others => Err(AppError {
            code: AppErrorCode::DataCorruption,
            detail: Some(format!("document-not-object, id:{id}")),
        }),
    }
}

#[async_trait]
impl AbstDocumentStore for AppMongoDbStore {
    fn label(&self) -> &str {
        self.alias.as_str()
    }

    async fn ping(&self) -> DefaultResult<(), AppError> {
        let _reply = self.db.run_command(doc! {"ping": 1}, None).await?;
        Ok(())
    }

    async fn create_collection(&self, _label: &str) -> DefaultResult<(), AppError> {
        // MongoDB creates a collection implicitly on first insertion
        Ok(())
    }

    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        content: AppDocument,
    ) -> DefaultResult<(), AppError> {
        let mut item = Self::id_filter(id);
        for (k, v) in to_bson_document(content)? {
            item.insert(k, v);
        }
        let _result = self.collection(collection).insert_one(item, None).await?;
        Ok(())
    }

    async fn fetch_all(
        &self,
        collection: &str,
    ) -> DefaultResult<Vec<(DocumentId, AppDocument)>, AppError> {
        let cursor = self.collection(collection).find(None, None).await?;
        let rows = cursor.try_collect::<Vec<Document>>().await?;
        rows.into_iter().map(from_bson_document).collect()
    }

    async fn fetch_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> DefaultResult<Option<AppDocument>, AppError> {
        let filter = Self::id_filter(id);
        let found = self.collection(collection).find_one(filter, None).await?;
        if let Some(raw) = found {
            let (_id, content) = from_bson_document(raw)?;
            Ok(Some(content))
        } else {
            Ok(None)
        }
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: DocumentId,
        fields: AppDocument,
    ) -> DefaultResult<AppUpdateInfo, AppError> {
        if fields.is_empty() {
            return Err(AppError {
                code: AppErrorCode::EmptyInputData,
                detail: Some(format!("update-fields, collection:{collection}")),
            });
        }
        let assigned = to_bson_document(fields)?;
        let setter = doc! {"$set": assigned};
        let result = self
            .collection(collection)
            .update_one(Self::id_filter(id), setter, None)
            .await?;
        Ok(AppUpdateInfo {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> DefaultResult<AppDeleteInfo, AppError> {
        let result = self
            .collection(collection)
            .delete_one(Self::id_filter(id), None)
            .await?;
        Ok(AppDeleteInfo {
            deleted: result.deleted_count,
        })
    }
} // end of impl AbstDocumentStore for AppMongoDbStore
