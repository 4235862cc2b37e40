mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, service::network::DiscordNetwork, startup,
    state::AppState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    startup::check_discord_settings(&db, &config).await?;

    let network = DiscordNetwork::from_config(&config)?;
    tracing::info!(
        "Register {} as redirect URL in the Discord application",
        network.redirect_url()
    );

    let app = router::router()
        .with_state(AppState::new(db, network, config.extra_data_policy))
        .layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
