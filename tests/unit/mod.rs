mod adapter;
mod config;
mod network;
mod repository;

use std::boxed::Box;
use std::collections::HashMap;
use std::sync::Arc;

use storefront::constant::env_vars;
use storefront::datastore::{AbstDocumentStore, AppInMemoryDStore};
use storefront::logging::AppLogContext;
use storefront::{AppConfig, AppDataStoreContext, AppInMemoryDbCfg, AppSharedState};

pub(crate) fn ut_default_cfg_args() -> HashMap<String, String> {
    HashMap::from([(env_vars::LOG_LEVEL.to_string(), "ERROR".to_string())])
}

pub(crate) fn ut_inmem_store(max_items: u32) -> Arc<Box<dyn AbstDocumentStore>> {
    let cfg = AppInMemoryDbCfg {
        alias: "unit-test".to_string(),
        max_items,
    };
    let obj: Box<dyn AbstDocumentStore> = Box::new(AppInMemoryDStore::new(&cfg));
    Arc::new(obj)
}

pub(crate) async fn ut_setup_share_state() -> AppSharedState {
    let cfg = AppConfig::new(ut_default_cfg_args()).unwrap();
    let logctx = AppLogContext::new(&cfg.api_server.logging).unwrap();
    AppSharedState::new(cfg, Arc::new(logctx)).await
}

pub(crate) fn ut_setup_share_state_no_dstore() -> AppSharedState {
    let cfg = AppConfig::new(ut_default_cfg_args()).unwrap();
    let logctx = AppLogContext::new(&cfg.api_server.logging).unwrap();
    let dstore = AppDataStoreContext { documents: None };
    AppSharedState::with_datastore(cfg, Arc::new(logctx), dstore)
}
