use anyhow::{Context, Result};
use call_assist::{
    create_router, AppState, CallOrchestrator, Config, HttpAnalysisClient, HttpClientDirectory,
    NatsRecognizer, NoticeLevel, SessionConfig,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "call-assist", about = "Live sales call assistant")]
struct Cli {
    /// Config file (without extension)
    #[arg(short, long, default_value = "config/call-assist")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cfg = Config::load(&cli.config)?;

    info!("Call Assist v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);
    info!("Analysis endpoint: {}", cfg.analysis.endpoint);

    let (recognizer, events) = NatsRecognizer::connect(&cfg.recognition)
        .await
        .context("Failed to set up speech recognition")?;

    let analysis = HttpAnalysisClient::new(
        cfg.analysis.endpoint.clone(),
        Duration::from_secs(cfg.analysis.timeout_secs),
    )?;
    let directory = HttpClientDirectory::new(cfg.directory.endpoint.clone());

    let session_config =
        SessionConfig::default().with_restart_delay_ms(cfg.recognition.restart_delay_ms);
    let orchestrator = CallOrchestrator::new(session_config, Arc::new(recognizer), Arc::new(analysis));
    let _events_task = orchestrator.listen(events);

    let mut notices = orchestrator.subscribe_notices();
    tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => match notice.level {
                    NoticeLevel::Error => warn!("[notice] {}", notice.message),
                    _ => info!("[notice] {}", notice.message),
                },
                Err(RecvError::Lagged(missed)) => warn!("Missed {} notices", missed),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = create_router(AppState::new(orchestrator, Arc::new(directory)));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP API listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
