use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pyassist::config::AppConfig;
use pyassist::conversation::InMemoryStore;
use pyassist::llm::{AuthenticationManager, ClaudeClient, StaticToken, TokenSource};
use pyassist::routes::configure_routes;
use pyassist::workflow::ChatWorkflow;

/// How long in-flight turns get to observe cancellation before the server stops
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let token_source: Arc<dyn TokenSource> = match &config.access_token {
        Some(token) => Arc::new(StaticToken::new(token.clone())),
        None => Arc::new(
            AuthenticationManager::new()
                .await
                .context("no Google Cloud credentials found")?,
        ),
    };

    let client = ClaudeClient::new(
        config.project_id.clone(),
        config.location.clone(),
        config.model,
        token_source,
    )?;
    client
        .verify_credentials()
        .await
        .context("could not obtain a Vertex AI access token")?;

    let shutdown = CancellationToken::new();
    let workflow = ChatWorkflow::new(Arc::new(client), Arc::new(InMemoryStore::new()))
        .with_settings(config.workflow_settings())
        .with_shutdown(shutdown.clone());

    let routes = configure_routes(Arc::new(workflow));

    info!(
        addr = %config.bind_addr,
        model = config.model.as_str(),
        project = %config.project_id,
        location = %config.location,
        "starting server"
    );
    let server = tokio::spawn(warp::serve(routes).run(config.bind_addr));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");

    shutdown.cancel();
    tokio::time::sleep(SHUTDOWN_GRACE).await;
    server.abort();

    Ok(())
}
