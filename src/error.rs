use std::fmt::{Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    InvalidPort,
    InvalidNumWorkers,
    InvalidLogLevel,
    InvalidDataStoreCfg,
    MissingDataStore,
    InvalidJsonFormat,
    EmptyInputData, // internal error, detail is never dumped to http response
    InvalidInput,   // client error
    InvalidDocumentId,
    RemoteDbServerFailure,
    ExceedingMaxLimit,
    AcquireLockFailure,
    DataTableNotExist,
    DataCorruption,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

#[derive(Debug, Clone)]
pub struct AppError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let default_detail = "none";
        let dp = if let Some(s) = &self.detail {
            s.as_str()
        } else {
            default_detail
        };
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}

impl std::error::Error for AppError {}

impl From<(AppErrorCode, String)> for AppError {
    fn from(value: (AppErrorCode, String)) -> Self {
        AppError {
            code: value.0,
            detail: Some(value.1),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError {
            code: AppErrorCode::IOerror(value.kind()),
            detail: Some(value.to_string()),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(value: mongodb::error::Error) -> Self {
        AppError {
            code: AppErrorCode::RemoteDbServerFailure,
            detail: Some(value.to_string()),
        }
    }
}
