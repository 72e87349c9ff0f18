use anyhow::Context;
use cir_assist::config::WizardConfig;
use cir_assist::server::{AppState, wizard_routes};

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

    let port: u16 = std::env::var("CIR_ASSIST_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    eprintln!("📋 Assistant CIR v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/wizard/status", port);
    eprintln!("   Progress WS: ws://0.0.0.0:{}/ws/progress", port);
    eprintln!("   All state is in-memory and lost on restart.\n");

    let config = WizardConfig::default();
    let state = AppState::new(config);
    let app = wizard_routes(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    tracing::info!(port, "Wizard server started");
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
