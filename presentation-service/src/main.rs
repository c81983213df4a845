use presentation_service::config::PresentationConfig;
use presentation_service::services::init_metrics;
use presentation_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PresentationConfig::load()?;

    init_tracing(
        "presentation-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )?;

    // Must run before any metric is recorded
    init_metrics()?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        e
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
