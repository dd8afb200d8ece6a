mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::{env, sync::Arc};

use tracing_subscriber::EnvFilter;

use handlers::{lambda, rest};
use repository::{MemoryStore, NoteStore};
use service::NoteService;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let lambda_mode = env::var("AWS_LAMBDA_RUNTIME_API").is_ok();

    // Log setup
    init_tracing(lambda_mode);

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded notes config");

    // Store creation
    let store: Arc<dyn NoteStore> = match &cfg.data_file {
        Some(path) => Arc::new(MemoryStore::from_file(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load notes: {e}");
            panic!("failed to load notes: {e}");
        })),
        None => {
            tracing::info!("No notes file configured, serving sample notes");
            Arc::new(MemoryStore::fixtures())
        }
    };

    // Service creation
    let service = Arc::new(NoteService::new(store));

    if lambda_mode {
        return lambda::run(service).await;
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port)).await?;
    tracing::info!("REST server starting, listening on {}", listener.local_addr()?);

    axum::serve(listener, rest::router(service)).await?;

    Ok(())
}

fn init_tracing(lambda_mode: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if lambda_mode {
        // CloudWatch stamps every line itself
        subscriber.with_target(false).without_time().init();
    } else {
        subscriber.init();
    }
}
