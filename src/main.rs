use anyhow::Result;
use tracing::info;

use devsys_backend::build_app;
use devsys_backend::config::{default_config_paths, Config, ErrorTrackingConfig};
use devsys_backend::state::AppState;
use devsys_backend::telemetry;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Error tracking has to be up before the runtime starts its worker threads
    let _sentry = telemetry::init(&ErrorTrackingConfig::from_env());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run())
}

async fn run() -> Result<()> {
    let (config, loaded_path) = Config::discover(&default_config_paths())?;
    match &loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let app_state = AppState::new(&config)?;
    if !app_state.voice_listener.available() {
        info!("Voice commands disabled; /voice-command will answer 503");
    }

    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind((
        config.system_config.host.as_str(),
        config.system_config.port,
    )).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
