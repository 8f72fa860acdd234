//! ProductLobby — backend for the platform connecting consumers who want
//! products to exist with the brands that might make them.
//!
//! Main entry point that wires the store, digest scheduler, and API
//! server.

use clap::Parser;
use lobby_api::ApiServer;
use lobby_core::config::AppConfig;
use lobby_digest::{DigestJob, SendGridMailer};
use lobby_store::{seed_demo, PlatformStore, SessionStore};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "product-lobby")]
#[command(about = "ProductLobby backend API and weekly digest scheduler")]
#[command(version)]
struct Cli {
    /// Instance identifier (overrides config)
    #[arg(long, env = "PRODUCT_LOBBY__INSTANCE_ID")]
    instance_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "PRODUCT_LOBBY__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "PRODUCT_LOBBY__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Seed demo data and log a development session token
    #[arg(long, default_value_t = false)]
    seed_demo: bool,

    /// Run one digest batch and exit instead of serving traffic
    #[arg(long, default_value_t = false)]
    digest_once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_lobby=info,lobby_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("ProductLobby starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(instance_id) = cli.instance_id {
        config.instance_id = instance_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }

    info!(
        instance_id = %config.instance_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        digest_enabled = config.digest.enabled,
        "Configuration loaded"
    );

    let store = Arc::new(PlatformStore::new());
    let sessions = Arc::new(SessionStore::new());

    if cli.seed_demo {
        match seed_demo(&store, &sessions) {
            Ok(seed) => info!(
                campaign = %seed.campaign_slug,
                token = %seed.creator_token,
                "Demo data seeded; pass the token as a Bearer credential"
            ),
            Err(e) => error!(error = %e, "Demo seeding failed"),
        }
    }

    // One-shot digest mode for manual/external scheduling
    if cli.digest_once {
        let job = DigestJob::new(
            store.clone(),
            SendGridMailer::new(&config.digest),
            config.digest.clone(),
        );
        let report = job.run().await;
        info!(
            attempted = report.attempted,
            sent = report.sent,
            failed = report.failed,
            "Digest batch finished"
        );
        return Ok(());
    }

    // Spawn the weekly digest scheduler
    if config.digest.enabled {
        let job = DigestJob::new(
            store.clone(),
            SendGridMailer::new(&config.digest),
            config.digest.clone(),
        );
        let period = std::time::Duration::from_secs(config.digest.interval_hours * 3600);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately; skip it so the initial
            // digest goes out one full period after startup.
            interval.tick().await;
            loop {
                interval.tick().await;
                let report = job.run().await;
                info!(
                    sent = report.sent,
                    failed = report.failed,
                    "Scheduled digest batch complete"
                );
            }
        });
    }

    // Start API server
    let api_server = ApiServer::new(config.clone(), store, sessions);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("ProductLobby is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
