// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod sink;
pub mod source;
pub mod translate;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::engine::{ConversionService, TranslatorBackend};
use crate::sink::{DirectorySink, DocumentSink, WriterSink};
use crate::translate::Translator;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - either a one-shot conversion (`--convert`)
/// - or the worker pool + HTTP server with Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref(), &args.overrides())?;

    if let Some(ref source) = args.convert {
        return convert_once(&cfg, source, args.output_dir.as_deref());
    }

    serve(cfg).await
}

/// Translate one file and hand it to a sink.
fn convert_once(cfg: &ConfigFile, source: &Path, output_dir: Option<&Path>) -> Result<()> {
    let payload = std::fs::read(source)
        .with_context(|| format!("failed to read workflow {}", source.display()))?;

    let backend = TranslatorBackend::new(Translator::new(cfg.translate_options()));
    let doc = backend
        .translate_source(&payload)
        .with_context(|| format!("failed to convert {}", source.display()))?;

    let sink: Box<dyn DocumentSink> = match output_dir {
        Some(dir) => Box::new(DirectorySink::new(dir)),
        None => Box::new(WriterSink::stdout()),
    };
    let handle = sink.submit(&doc)?;

    info!(source = %source.display(), location = %handle.location, "conversion complete");
    Ok(())
}

/// Run the HTTP service until Ctrl-C, then drain the workers.
async fn serve(cfg: ConfigFile) -> Result<()> {
    let backend = Arc::new(TranslatorBackend::new(Translator::new(
        cfg.translate_options(),
    )));
    let service = Arc::new(ConversionService::start(cfg.service_options(), backend));

    let listener = tokio::net::TcpListener::bind(cfg.server.listen.as_str())
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen))?;

    info!(
        listen = %cfg.server.listen,
        sync = %cfg.server.sync_path,
        submit = %cfg.server.async_path,
        result = %cfg.server.result_path,
        workers = service.workers(),
        queue_capacity = service.queue_capacity(),
        "gha2argo listening"
    );

    let app = api::router(Arc::clone(&service), &cfg.server);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("listener stopped; draining workers");
    service.shutdown().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received, shutting down");
}
