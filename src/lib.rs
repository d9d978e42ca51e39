use std::boxed::Box;
use std::sync::Arc;

pub mod api;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod network;
pub mod repository;

mod config;
pub use config::{
    ApiServerCfg, AppConfig, AppDataStoreCfg, AppInMemoryDbCfg, AppLoggingCfg, AppMongoDbCfg,
    WebApiListenCfg,
};

mod adapter;
pub use adapter::datastore;

type WebApiPath = &'static str;

pub struct AppDataStoreContext {
    pub documents: Option<Arc<Box<dyn datastore::AbstDocumentStore>>>,
}

// global state shared by all threads, constructed once at startup then
// injected to every request handler
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<logging::AppLogContext>,
    dstore: Arc<AppDataStoreContext>,
}

impl AppSharedState {
    pub async fn new(cfg: AppConfig, log: Arc<logging::AppLogContext>) -> Self {
        let documents = datastore::build_context(log.clone(), &cfg.api_server.data_store).await;
        let ds_ctx = AppDataStoreContext { documents };
        Self::with_datastore(cfg, log, ds_ctx)
    }

    /// for callers which set up the data store on their own
    pub fn with_datastore(
        cfg: AppConfig,
        log: Arc<logging::AppLogContext>,
        dstore: AppDataStoreContext,
    ) -> Self {
        Self {
            _cfg: Arc::new(cfg),
            _log: log,
            dstore: Arc::new(dstore),
        }
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }

    pub fn log_context(&self) -> &Arc<logging::AppLogContext> {
        &self._log
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self.dstore.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _cfg: self._cfg.clone(),
            _log: self._log.clone(),
            dstore: self.dstore.clone(),
        }
    }
}
