//! MailSift
//!
//! Web front-end classifying pasted email text as spam or not spam with a
//! model trained offline.

use anyhow::Result;
use clap::Parser;
use mailsift_classifiers::{InferenceService, ModelState, NOT_SPAM_THRESHOLD};
use mailsift_web::cli::Cli;
use mailsift_web::{app, AppState, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting MailSift");

    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Model: {}", config.model_path.display());
    info!("Not-spam threshold: {:.2}", NOT_SPAM_THRESHOLD);

    // A missing or broken model is reported per request, not fatal
    let model = ModelState::load(&config.model_path);
    if let ModelState::Unavailable { reason } = &model {
        warn!("Serving without a model: {}", reason);
    }

    let mut state = AppState::new(InferenceService::new(model));
    if config.metrics.enabled {
        state = state.with_metrics(init_metrics()?);
    }

    app::run_server(state, &config).await
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("mailsift=debug,mailsift_web=debug,mailsift_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("mailsift=info,mailsift_web=info,mailsift_classifiers=info")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "mailsift_requests_total",
        "Total number of prediction requests by endpoint"
    );
    metrics::describe_counter!(
        "mailsift_decisions_total",
        "Total number of decisions by outcome"
    );
    metrics::describe_histogram!(
        "mailsift_inference_latency_us",
        metrics::Unit::Microseconds,
        "Inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
