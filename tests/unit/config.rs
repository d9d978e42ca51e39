use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use storefront::constant::env_vars;
use storefront::constant::logging::{Destination, Level};
use storefront::error::AppErrorCode;
use storefront::{AppConfig, AppDataStoreCfg};

fn ut_cfg_args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    let iter = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()));
    HashMap::from_iter(iter)
}

#[test]
fn cfg_default_ok() {
    let result = AppConfig::new(HashMap::new());
    assert!(result.is_ok());
    let cfg = result.unwrap().api_server;
    assert_eq!(cfg.listen.port, 3000);
    assert_eq!(cfg.listen.host.as_str(), "0.0.0.0");
    assert_eq!(cfg.num_workers, 4);
    assert_eq!(cfg.limit_req_body_in_bytes, 102400);
    assert_eq!(cfg.logging.min_level, Level::INFO);
    assert_eq!(cfg.logging.destination, Destination::CONSOLE);
    if let AppDataStoreCfg::InMemory(d) = cfg.data_store {
        assert_eq!(d.max_items, 2200);
    } else {
        assert!(false);
    }
}

#[test]
fn cfg_mongodb_ok() {
    let args = ut_cfg_args(&[
        (env_vars::MONGODB_URI, "mongodb://localhost:27017/shop"),
        (env_vars::MONGODB_DATABASE, "ecommerce"),
        (env_vars::PORT, "8012"),
        (env_vars::LOG_LEVEL, "warn"),
        (env_vars::LOG_FILE_PATH, "/tmp/storefront.log"),
    ]);
    let cfg = AppConfig::new(args).unwrap().api_server;
    assert_eq!(cfg.listen.port, 8012);
    assert_eq!(cfg.logging.min_level, Level::WARNING);
    assert_eq!(cfg.logging.destination, Destination::LOCALFS);
    assert_eq!(cfg.logging.path.as_deref(), Some("/tmp/storefront.log"));
    match cfg.data_store {
        AppDataStoreCfg::MongoDb(d) => {
            assert_eq!(d.uri.as_str(), "mongodb://localhost:27017/shop");
            assert_eq!(d.db_name.as_deref(), Some("ecommerce"));
        }
        _others => assert!(false),
    }
}

#[test]
fn cfg_invalid_port() {
    for raw in ["abc", "70000", "-1"] {
        let args = ut_cfg_args(&[(env_vars::PORT, raw)]);
        let result = AppConfig::new(args);
        assert!(result.is_err());
        let e = result.err().unwrap();
        assert_eq!(e.code, AppErrorCode::InvalidPort);
    }
}

#[test]
fn cfg_invalid_log_level() {
    let args = ut_cfg_args(&[(env_vars::LOG_LEVEL, "verbose")]);
    let e = AppConfig::new(args).err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidLogLevel);
    assert_eq!(e.detail.as_deref(), Some("verbose"));
}

#[test]
fn cfg_invalid_uri_scheme() {
    let args = ut_cfg_args(&[(env_vars::MONGODB_URI, "postgres://localhost:5432/shop")]);
    let e = AppConfig::new(args).err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidDataStoreCfg);
}

#[test]
fn cfg_invalid_num_workers() {
    for raw in ["0", "129", "many"] {
        let args = ut_cfg_args(&[(env_vars::WORKER_THREADS, raw)]);
        let e = AppConfig::new(args).err().unwrap();
        assert_eq!(e.code, AppErrorCode::InvalidNumWorkers);
    }
}

#[test]
fn cfg_inmem_zero_capacity() {
    let args = ut_cfg_args(&[(env_vars::INMEM_MAX_ITEMS, "0")]);
    let e = AppConfig::new(args).err().unwrap();
    assert_eq!(e.code, AppErrorCode::InvalidDataStoreCfg);
}

#[test]
fn cfg_collect_dotenv_ok() {
    let path = env::temp_dir().join(format!("storefront-ut-{}.env", std::process::id()));
    let content = "INMEM_MAX_ITEMS=33\nLOG_FILE_PATH=/tmp/from-dotenv.log\nUNRELATED_KEY=abc\n";
    fs::write(&path, content).unwrap();
    let result = AppConfig::collect_env_args(path.as_path());
    fs::remove_file(&path).unwrap();
    let args = result.unwrap();
    assert_eq!(args.get(env_vars::INMEM_MAX_ITEMS).map(String::as_str), Some("33"));
    assert!(args.contains_key(env_vars::LOG_FILE_PATH));
    assert!(!args.contains_key("UNRELATED_KEY"));
    let cfg = AppConfig::new(args).unwrap().api_server;
    if let AppDataStoreCfg::InMemory(d) = cfg.data_store {
        assert_eq!(d.max_items, 33);
    }
}

#[test]
fn cfg_collect_dotenv_missing_file() {
    let path = Path::new("/nonexist/storefront/.env");
    let result = AppConfig::collect_env_args(path);
    assert!(result.is_ok());
    let args = result.unwrap();
    assert!(!args.contains_key("UNRELATED_KEY"));
}
