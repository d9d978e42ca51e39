use std::io::stdout;
use std::path::Path;
use std::result::Result as DefaultResult;

use tracing::dispatcher::Dispatch;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::Layer as TraceLayer;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{self, Layer as LayerIntf, Registry};

use crate::constant::logging::{Destination as DstOption, Level as AppLogLevelInner};
use crate::error::{AppError, AppErrorCode};
use crate::AppLoggingCfg;

pub type AppLogLevel = AppLogLevelInner;

pub struct AppLogContext {
    _io_guard: WorkerGuard,
    logger: Dispatch,
}

// this macro has to be exposed since top-level binary executable (e.g. web)
// will invoke this macro indirectly
#[macro_export]
macro_rules! to_3rdparty_level {
    ($lvlin:expr) => {
        match $lvlin {
            $crate::logging::AppLogLevel::FATAL | $crate::logging::AppLogLevel::ERROR => {
                tracing::Level::ERROR
            }
            $crate::logging::AppLogLevel::WARNING => tracing::Level::WARN,
            $crate::logging::AppLogLevel::INFO => tracing::Level::INFO,
            $crate::logging::AppLogLevel::DEBUG => tracing::Level::DEBUG,
            $crate::logging::AppLogLevel::TRACE => tracing::Level::TRACE,
        } // in `tracing` ecosystem, level comparison is like
          // TRACE > DEBUG > INFO > WARN > ERROR
    };
}

fn _gen_localfile_writer(cfg: &AppLoggingCfg) -> DefaultResult<(NonBlocking, WorkerGuard), AppError> {
    let fullpath = cfg.path.as_ref().ok_or(AppError {
        code: AppErrorCode::InvalidInput,
        detail: Some("log-file-path-missing".to_string()),
    })?;
    let p = Path::new(fullpath);
    let (dir, fname_prefix) = match (p.parent(), p.file_name()) {
        (Some(d), Some(f)) => (d, f),
        _others => {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(format!("log-file-path-invalid: {fullpath}")),
            })
        }
    };
    let wr_dst = RollingFileAppender::new(Rotation::NEVER, dir, fname_prefix);
    Ok(tracing_appender::non_blocking(wr_dst))
}

fn _gen_console_writer() -> (NonBlocking, WorkerGuard) {
    let wr_dst = stdout();
    tracing_appender::non_blocking(wr_dst)
} // Note tracing spawns new thread dedicating to each non-blocking writer,
  // the context-switching rule depends on underlying OS platform.

impl AppLogContext {
    pub fn new(cfg: &AppLoggingCfg) -> DefaultResult<Self, AppError> {
        let (io_writer, guard) = match &cfg.destination {
            DstOption::CONSOLE => _gen_console_writer(),
            DstOption::LOCALFS => _gen_localfile_writer(cfg)?,
        }; // callers MUST always keep the guard along with writer, for successfully flushing
           // log messages to I/O
        let lvl = to_3rdparty_level!(&cfg.min_level);
        let layer = TraceLayer::new()
            .with_writer(io_writer)
            .with_file(false) // to prevent full path exposed
            .with_line_number(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_target(true)
            .with_filter(LevelFilter::from_level(lvl));
        let subscriber = Registry::default().with(layer);
        Ok(Self {
            _io_guard: guard,
            logger: Dispatch::new(subscriber),
        })
    }

    pub fn get_assigner(&self) -> &Dispatch {
        &self.logger
    }
} // end of impl AppLogContext

#[macro_export]
macro_rules! app_log_event {
    ( $ctx:ident, $lvl:expr, $($arg:tt)+ ) => {{
        let assigner = $ctx.get_assigner();
        const LVL_INNER: tracing::Level = $crate::logging::to_3rdparty_level!($lvl);
        tracing::dispatcher::with_default(assigner, || {
            tracing::event!(LVL_INNER, $($arg)+);
        });
    }};
}

pub use app_log_event;
pub use to_3rdparty_level;
