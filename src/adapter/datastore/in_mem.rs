use std::collections::{BTreeMap, HashMap};
use std::result::Result as DefaultResult;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{AbstDocumentStore, AppDeleteInfo, AppDocument, AppUpdateInfo, DocumentId};
use crate::config::AppInMemoryDbCfg;
use crate::error::{AppError, AppErrorCode};

// simple implementation of in-memory document storage, for development
// and testing purpose.
//
// Rows are keyed by the hex form of the document ID, object IDs begin with
// creation timestamp, so iterating a table follows insertion order
type InnerTable = BTreeMap<String, AppDocument>;
type AllTable = HashMap<String, InnerTable>;

pub struct AppInMemoryDStore {
    alias: String,
    max_items_per_table: u32,
    table_map: Mutex<AllTable>,
}

impl AppInMemoryDStore {
    pub fn new(cfg: &AppInMemoryDbCfg) -> Self {
        Self {
            alias: format!("in-memory store ({})", cfg.alias),
            max_items_per_table: cfg.max_items,
            table_map: Mutex::new(HashMap::new()),
        }
    }

    fn try_get_table(&self) -> DefaultResult<MutexGuard<'_, AllTable>, AppError> {
        self.table_map.lock().map_err(|e| AppError {
            detail: Some(e.to_string()),
            code: AppErrorCode::AcquireLockFailure,
        })
    }

    fn _table_mut<'a>(
        map: &'a mut AllTable,
        label: &str,
    ) -> DefaultResult<&'a mut InnerTable, AppError> {
        map.get_mut(label).ok_or(AppError {
            detail: Some(label.to_string()),
            code: AppErrorCode::DataTableNotExist,
        })
    }
} // end of impl AppInMemoryDStore

#[async_trait]
impl AbstDocumentStore for AppInMemoryDStore {
    fn label(&self) -> &str {
        self.alias.as_str()
    }

    async fn ping(&self) -> DefaultResult<(), AppError> {
        let _guard = self.try_get_table()?;
        Ok(())
    }

    async fn create_collection(&self, label: &str) -> DefaultResult<(), AppError> {
        let mut guard = self.try_get_table()?;
        guard.entry(label.to_string()).or_default();
        Ok(())
    }

    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        content: AppDocument,
    ) -> DefaultResult<(), AppError> {
        let mut guard = self.try_get_table()?;
        let table = Self::_table_mut(&mut guard, collection)?;
        if self.max_items_per_table as usize <= table.len() {
            let msg = format!("{}, {}, {}", module_path!(), line!(), collection);
            return Err(AppError {
                detail: Some(msg),
                code: AppErrorCode::ExceedingMaxLimit,
            });
        }
        let key = id.to_hex();
        if table.contains_key(&key) {
            let msg = format!("duplicate key, collection:{collection}, id:{key}");
            return Err(AppError {
                detail: Some(msg),
                code: AppErrorCode::InvalidInput,
            });
        }
        table.insert(key, content);
        Ok(())
    }

    async fn fetch_all(
        &self,
        collection: &str,
    ) -> DefaultResult<Vec<(DocumentId, AppDocument)>, AppError> {
        let mut guard = self.try_get_table()?;
        let table = Self::_table_mut(&mut guard, collection)?;
        table
            .iter()
            .map(|(key, content)| {
                let id = DocumentId::from_str(key).map_err(|e| AppError {
                    code: AppErrorCode::DataCorruption,
                    detail: e.detail,
                })?;
                Ok((id, content.clone()))
            })
            .collect()
    }

    async fn fetch_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> DefaultResult<Option<AppDocument>, AppError> {
        let mut guard = self.try_get_table()?;
        let table = Self::_table_mut(&mut guard, collection)?;
        Ok(table.get(&id.to_hex()).cloned())
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: DocumentId,
        fields: AppDocument,
    ) -> DefaultResult<AppUpdateInfo, AppError> {
        let mut guard = self.try_get_table()?;
        let table = Self::_table_mut(&mut guard, collection)?;
        let out = if let Some(saved) = table.get_mut(&id.to_hex()) {
            // the document counts as modified only when at least one value differs
            let mut modified = 0u64;
            for (k, v) in fields {
                if saved.get(&k) != Some(&v) {
                    saved.insert(k, v);
                    modified = 1;
                }
            }
            AppUpdateInfo {
                matched: 1,
                modified,
            }
        } else {
            AppUpdateInfo {
                matched: 0,
                modified: 0,
            }
        };
        Ok(out)
    }

    async fn delete(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> DefaultResult<AppDeleteInfo, AppError> {
        let mut guard = self.try_get_table()?;
        let table = Self::_table_mut(&mut guard, collection)?;
        let deleted = if table.remove(&id.to_hex()).is_some() {
            1
        } else {
            0
        };
        Ok(AppDeleteInfo { deleted })
    }
} // end of impl AbstDocumentStore for AppInMemoryDStore
