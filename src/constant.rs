use crate::WebApiPath;

pub mod app_meta {
    pub const LABAL: &str = "storefront";
    pub const WELCOME_MSG: &str = "Welcome to my API";
}

pub mod env_vars {
    pub const MONGODB_URI: &str = "MONGODB_URI";
    pub const MONGODB_DATABASE: &str = "MONGODB_DATABASE";
    pub const PORT: &str = "PORT";
    pub const HOST: &str = "HOST";
    pub const WORKER_THREADS: &str = "WORKER_THREADS";
    pub const REQ_BODY_LIMIT: &str = "REQ_BODY_LIMIT_BYTES";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FILE_PATH: &str = "LOG_FILE_PATH";
    pub const INMEM_MAX_ITEMS: &str = "INMEM_MAX_ITEMS";

    pub const EXPECTED_LABELS: [&str; 9] = [
        MONGODB_URI,
        MONGODB_DATABASE,
        PORT,
        HOST,
        WORKER_THREADS,
        REQ_BODY_LIMIT,
        LOG_LEVEL,
        LOG_FILE_PATH,
        INMEM_MAX_ITEMS,
    ];
}

pub mod default_cfg {
    pub const PORT: u16 = 3000;
    pub const HOST: &str = "0.0.0.0";
    pub const NUM_WORKERS: u8 = 4;
    pub const STACK_SZ_KB: u16 = 2048;
    // the same default as the JSON body parser of most web frameworks
    pub const REQ_BODY_LIMIT_BYTES: usize = 100 << 10;
    // applied when neither the URI nor the environment names a database
    pub const MONGODB_DATABASE: &str = "test";
}

pub mod hard_limit {
    pub const MAX_ITEMS_STORED_PER_MODEL: u32 = 2200u32;
    pub const MAX_NUM_WORKERS: u8 = 128u8;
}

pub mod collection {
    pub const PRODUCT: &str = "products";
    pub const ORDER: &str = "orders";
}

pub mod doc_field {
    pub const ID: &str = "_id";
    pub const VERSION: &str = "__v";
}

pub const HTTP_CONTENT_TYPE_JSON: &str = "application/json";

pub(crate) mod api {
    use super::WebApiPath;

    #[allow(non_camel_case_types)]
    pub(crate) struct web {}

    impl web {
        pub(crate) const API_BASE_PATH: &'static str = "/api";
        pub(crate) const DOC_UI_PATH: &'static str = "/api-doc";
        pub(crate) const DOC_SPEC_PATH: &'static str = "/api-docs/openapi.json";
        pub(crate) const PRODUCT_COLLECTION: WebApiPath = "/product";
        pub(crate) const PRODUCT_SINGLE: WebApiPath = "/product/:id";
        pub(crate) const ORDER_COLLECTION: WebApiPath = "/order";
        pub(crate) const ORDER_SINGLE: WebApiPath = "/order/:id";
    }
}

pub mod logging {
    use std::str::FromStr;

    use crate::error::{AppError, AppErrorCode};

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Level {
        TRACE,
        DEBUG,
        INFO,
        WARNING,
        ERROR,
        FATAL,
    }

    impl FromStr for Level {
        type Err = AppError;
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_uppercase().as_str() {
                "TRACE" => Ok(Self::TRACE),
                "DEBUG" => Ok(Self::DEBUG),
                "INFO" => Ok(Self::INFO),
                "WARNING" | "WARN" => Ok(Self::WARNING),
                "ERROR" => Ok(Self::ERROR),
                "FATAL" => Ok(Self::FATAL),
                _others => Err(AppError {
                    code: AppErrorCode::InvalidLogLevel,
                    detail: Some(s.to_string()),
                }),
            }
        }
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    }
}
