mod in_mem;
mod mongo;

use std::boxed::Box;
use std::fmt::Display;
use std::result::Result as DefaultResult;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map as JsnMap, Value as JsnVal};

pub use in_mem::AppInMemoryDStore;
pub use mongo::AppMongoDbStore;

use crate::config::AppDataStoreCfg;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

/// loosely-typed content of a stored document, excluding its identifier
pub type AppDocument = JsnMap<String, JsnVal>;

/// unique key of a document, 12-byte object ID which is presented
/// as 24 hexadecimal characters to external callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
    pub(crate) fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl FromStr for DocumentId {
    type Err = AppError;
    fn from_str(s: &str) -> DefaultResult<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|_e| AppError {
            code: AppErrorCode::InvalidDocumentId,
            detail: Some(format!("Cast to ObjectId failed for value \"{s}\"")),
        })
    }
}

impl From<ObjectId> for DocumentId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppUpdateInfo {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppDeleteInfo {
    pub deleted: u64,
}

// each operation maps to exactly one call to the underlying database,
// the store instance is shared by all request handlers across threads
#[async_trait]
pub trait AbstDocumentStore: Send + Sync {
    fn label(&self) -> &str;

    async fn ping(&self) -> DefaultResult<(), AppError>;

    async fn create_collection(&self, label: &str) -> DefaultResult<(), AppError>;

    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        content: AppDocument,
    ) -> DefaultResult<(), AppError>;

    async fn fetch_all(
        &self,
        collection: &str,
    ) -> DefaultResult<Vec<(DocumentId, AppDocument)>, AppError>;

    async fn fetch_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> DefaultResult<Option<AppDocument>, AppError>;

    /// replace the given fields only, fields absent in `fields` keep
    /// their current values
    async fn update_fields(
        &self,
        collection: &str,
        id: DocumentId,
        fields: AppDocument,
    ) -> DefaultResult<AppUpdateInfo, AppError>;

    async fn delete(&self, collection: &str, id: DocumentId)
        -> DefaultResult<AppDeleteInfo, AppError>;
}

pub(crate) async fn build_context(
    logctx: Arc<AppLogContext>,
    cfg: &AppDataStoreCfg,
) -> Option<Arc<Box<dyn AbstDocumentStore>>> {
    let built: DefaultResult<Box<dyn AbstDocumentStore>, AppError> = match cfg {
        AppDataStoreCfg::InMemory(d) => {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "no database URI configured, documents are kept in memory only"
            );
            Ok(Box::new(AppInMemoryDStore::new(d)))
        }
        AppDataStoreCfg::MongoDb(d) => match AppMongoDbStore::try_build(d).await {
            Ok(store) => Ok(Box::new(store)),
            Err(e) => Err(e),
        },
    };
    match built {
        Ok(store) => {
            // connectivity check at startup only, no retry
            match store.ping().await {
                Ok(()) => app_log_event!(
                    logctx,
                    AppLogLevel::INFO,
                    "connected to {}",
                    store.label()
                ),
                Err(e) => app_log_event!(
                    logctx,
                    AppLogLevel::ERROR,
                    "error connecting to {}: {}",
                    store.label(),
                    e
                ),
            }
            Some(Arc::new(store))
        }
        Err(e) => {
            app_log_event!(logctx, AppLogLevel::ERROR, "datastore init failure: {}", e);
            None
        }
    }
} // end of fn build_context
