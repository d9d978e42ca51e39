use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::result::Result as DefaultResult;
use std::str::FromStr;

use crate::constant::logging::{Destination, Level};
use crate::constant::{default_cfg, env_vars, hard_limit};
use crate::error::{AppError, AppErrorCode};

pub struct AppLoggingCfg {
    pub min_level: Level,
    pub destination: Destination,
    pub path: Option<String>,
}

pub struct WebApiListenCfg {
    pub host: String,
    pub port: u16,
}

#[derive(Debug)]
pub struct AppInMemoryDbCfg {
    pub alias: String,
    pub max_items: u32,
}

#[derive(Debug)]
pub struct AppMongoDbCfg {
    pub alias: String,
    pub uri: String,
    // overrides the default database carried in the connection string
    pub db_name: Option<String>,
}

#[derive(Debug)]
pub enum AppDataStoreCfg {
    InMemory(AppInMemoryDbCfg),
    MongoDb(AppMongoDbCfg),
}

pub struct ApiServerCfg {
    pub logging: AppLoggingCfg,
    pub listen: WebApiListenCfg,
    pub limit_req_body_in_bytes: usize,
    pub num_workers: u8,
    pub stack_sz_kb: u16,
    pub data_store: AppDataStoreCfg,
}

pub struct AppConfig {
    pub api_server: ApiServerCfg,
}

impl AppConfig {
    /// collect the expected variables from the optional dotenv file at `path`
    /// and the process environment, the latter takes precedence. A missing
    /// file is not an error
    pub fn collect_env_args(
        path: &Path,
    ) -> DefaultResult<HashMap<String, String, RandomState>, AppError> {
        let expected = |k: &String| env_vars::EXPECTED_LABELS.contains(&k.as_str());
        let mut out = HashMap::new();
        match dotenvy::from_path_iter(path) {
            Ok(iter) => {
                for item in iter {
                    let (k, v) = item.map_err(|e| Self::_dotenv_error(path, e))?;
                    if expected(&k) {
                        out.insert(k, v);
                    }
                }
            }
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Self::_dotenv_error(path, e)),
        }
        out.extend(env::vars().filter(|(k, _v)| expected(k)));
        Ok(out)
    }

    fn _dotenv_error(path: &Path, e: dotenvy::Error) -> AppError {
        AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(format!("dotenv:{}, {e}", path.display())),
        }
    }

    /// build the configuration from environment variables already filtered by
    /// the caller, missing variables fall back to defaults
    pub fn new(mut args: HashMap<String, String, RandomState>) -> DefaultResult<Self, AppError> {
        let logging = Self::_parse_logging(&mut args)?;
        let listen = Self::_parse_listener(&mut args)?;
        let data_store = Self::_parse_datastore(&mut args)?;
        let limit_req_body_in_bytes = Self::_parse_number(
            &mut args,
            env_vars::REQ_BODY_LIMIT,
            default_cfg::REQ_BODY_LIMIT_BYTES,
            AppErrorCode::InvalidInput,
        )?;
        let num_workers = Self::_parse_number(
            &mut args,
            env_vars::WORKER_THREADS,
            default_cfg::NUM_WORKERS,
            AppErrorCode::InvalidNumWorkers,
        )?;
        if num_workers == 0 || num_workers > hard_limit::MAX_NUM_WORKERS {
            return Err(AppError {
                code: AppErrorCode::InvalidNumWorkers,
                detail: Some(format!(
                    "range:1-{}, given:{num_workers}",
                    hard_limit::MAX_NUM_WORKERS
                )),
            });
        }
        let api_server = ApiServerCfg {
            logging,
            listen,
            limit_req_body_in_bytes,
            num_workers,
            stack_sz_kb: default_cfg::STACK_SZ_KB,
            data_store,
        };
        Ok(Self { api_server })
    } // end of fn new

    fn _parse_number<T: FromStr>(
        args: &mut HashMap<String, String, RandomState>,
        key: &str,
        default: T,
        code: AppErrorCode,
    ) -> DefaultResult<T, AppError> {
        if let Some(raw) = args.remove(key) {
            raw.trim().parse::<T>().map_err(|_e| AppError {
                code,
                detail: Some(format!("env:{key}, value:{raw}")),
            })
        } else {
            Ok(default)
        }
    }

    fn _parse_listener(
        args: &mut HashMap<String, String, RandomState>,
    ) -> DefaultResult<WebApiListenCfg, AppError> {
        let port = Self::_parse_number(
            args,
            env_vars::PORT,
            default_cfg::PORT,
            AppErrorCode::InvalidPort,
        )?;
        let host = args
            .remove(env_vars::HOST)
            .filter(|h| !h.is_empty())
            .unwrap_or(default_cfg::HOST.to_string());
        Ok(WebApiListenCfg { host, port })
    }

    fn _parse_logging(
        args: &mut HashMap<String, String, RandomState>,
    ) -> DefaultResult<AppLoggingCfg, AppError> {
        let min_level = if let Some(raw) = args.remove(env_vars::LOG_LEVEL) {
            Level::from_str(raw.trim())?
        } else {
            Level::INFO
        };
        let path = args.remove(env_vars::LOG_FILE_PATH).filter(|p| !p.is_empty());
        let destination = if path.is_some() {
            Destination::LOCALFS
        } else {
            Destination::CONSOLE
        };
        Ok(AppLoggingCfg {
            min_level,
            destination,
            path,
        })
    }

    fn _parse_datastore(
        args: &mut HashMap<String, String, RandomState>,
    ) -> DefaultResult<AppDataStoreCfg, AppError> {
        let max_items = Self::_parse_number(
            args,
            env_vars::INMEM_MAX_ITEMS,
            hard_limit::MAX_ITEMS_STORED_PER_MODEL,
            AppErrorCode::InvalidDataStoreCfg,
        )?;
        let db_name = args
            .remove(env_vars::MONGODB_DATABASE)
            .filter(|n| !n.is_empty());
        let uri = args.remove(env_vars::MONGODB_URI).filter(|u| !u.is_empty());
        let out = if let Some(uri) = uri {
            if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                return Err(AppError {
                    code: AppErrorCode::InvalidDataStoreCfg,
                    detail: Some("unknown-uri-scheme".to_string()),
                });
            }
            AppDataStoreCfg::MongoDb(AppMongoDbCfg {
                alias: "primary".to_string(),
                uri,
                db_name,
            })
        } else {
            if max_items == 0 {
                return Err(AppError {
                    code: AppErrorCode::InvalidDataStoreCfg,
                    detail: Some("inmem-max-items-zero".to_string()),
                });
            }
            AppDataStoreCfg::InMemory(AppInMemoryDbCfg {
                alias: "local".to_string(),
                max_items,
            })
        };
        Ok(out)
    } // end of fn _parse_datastore
} // end of impl AppConfig
