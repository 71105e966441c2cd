use std::sync::Arc;

use anyhow::Context;

use energy_intake::api::intake_routes;
use energy_intake::config::IntakeConfig;
use energy_intake::intake::SessionRegistry;
use energy_intake::repl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = IntakeConfig::from_env().context("invalid ENERGY_INTAKE_* configuration")?;
    let registry = SessionRegistry::new(config.intake_settings());

    eprintln!("⚡ Energy Intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Variant: {}", config.variant);
    eprintln!("   Appliances: {}", registry.settings().catalog.names().join(", "));
    eprintln!("   API: http://{}/api/sessions", config.bind_addr());

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    let app = intake_routes(Arc::clone(&registry));

    if config.cli {
        eprintln!("   CLI: enabled (/reset, /status, /quit)\n");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "HTTP server stopped");
            }
        });
        repl::run_stdio(registry).await?;
        return Ok(());
    }

    tracing::info!(addr = %config.bind_addr(), "Intake server started");
    axum::serve(listener, app).await?;
    Ok(())
}
