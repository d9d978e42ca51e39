use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Builder as RuntimeBuilder;
use tower::ServiceBuilder;

use storefront::api::web::route_table;
use storefront::logging::{app_log_event, AppLogContext, AppLogLevel};
use storefront::network::{app_web_service, middleware, net_listener};
use storefront::{AppConfig, AppSharedState};

async fn shutdown_signal() {
    // error from the signal handler means ctrl-c is never going to be
    // captured, keep the server running in such case
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn start_server(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    let cfg = shr_state.config().clone();
    let routes = route_table();
    let (service, num_applied) = app_web_service(routes, shr_state);
    if num_applied == 0 {
        app_log_event!(
            log_ctx_p,
            AppLogLevel::ERROR,
            "no route created, web API server failed to start"
        );
        return;
    }
    let listener = &cfg.api_server.listen;
    match net_listener(listener.host.clone(), listener.port).await {
        Ok(b) => {
            let reqlm = middleware::req_body_limit(cfg.api_server.limit_req_body_in_bytes);
            let co = middleware::cors();
            let middlewares = ServiceBuilder::new().layer(reqlm).layer(co);
            let service = service.layer(middlewares);
            app_log_event!(
                log_ctx_p,
                AppLogLevel::INFO,
                "server listening on port {}",
                listener.port
            );
            let result = axum::serve(b, service.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await;
            if let Err(e) = result {
                app_log_event!(log_ctx_p, AppLogLevel::ERROR, "API server error, {} ", e);
            }
            app_log_event!(log_ctx_p, AppLogLevel::WARNING, "API server terminating ");
        }
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "API server failed to start, {} ",
                e
            );
        }
    }
} // end of fn start_server

fn start_async_runtime(cfg: AppConfig) {
    let log_ctx = match AppLogContext::new(&cfg.api_server.logging) {
        Ok(l) => l,
        Err(e) => {
            println!("app failed to init logger, error: {} ", e);
            return;
        }
    };
    let log_ctx = Arc::new(log_ctx);
    let (log_ctx2, log_ctx3) = (log_ctx.clone(), log_ctx.clone());
    let num_workers = cfg.api_server.num_workers as usize;
    let stack_nbytes: usize = (cfg.api_server.stack_sz_kb as usize) << 10;
    let result = RuntimeBuilder::new_multi_thread()
        .worker_threads(num_workers)
        .on_thread_start(move || {
            // invoked by every new worker thread, the log context is
            // cloned each time
            let log_cpy = log_ctx2.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker started");
        })
        .on_thread_stop(move || {
            let log_cpy = log_ctx3.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker terminating");
        })
        .thread_stack_size(stack_nbytes)
        .thread_name("web-api-worker")
        // manage low-level I/O drivers used by network types
        .enable_io()
        .enable_time()
        .build();
    match result {
        Ok(rt) => {
            // data store client is built inside the runtime, the database
            // driver spawns its own background tasks
            rt.block_on(async move {
                let shr_state = AppSharedState::new(cfg, log_ctx).await;
                start_server(shr_state).await;
            });
        }
        Err(e) => {
            let log_ctx_p = log_ctx;
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "async runtime failed to build, {} ",
                e
            );
        }
    };
} // end of start_async_runtime

fn main() {
    let result = AppConfig::collect_env_args(Path::new(".env")).and_then(AppConfig::new);
    match result {
        Ok(cfg) => start_async_runtime(cfg),
        Err(e) => {
            println!("app failed to configure, error: {} ", e);
        }
    }
}
