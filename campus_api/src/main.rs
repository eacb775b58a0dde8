mod app;
mod config;
mod docs;
mod error;
mod guide;
mod locations;
mod pagination;
mod state;
mod tours;

use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{app::build_app, config::ApiConfig, state::AppState};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    aide::generate::on_error(|error| tracing::error!("{}", error));
    aide::generate::extract_schemas(true);

    let config = ApiConfig::from_env()?;
    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::from_config(config)?);

    let mut api = OpenApi::default();
    let app = build_app(state, &mut api);

    if std::env::args().any(|a| a == "--generate-openapi") {
        std::fs::create_dir_all("schemas")?;
        std::fs::write("schemas/openapi.json", serde_json::to_string_pretty(&api)?)?;
        info!("OpenAPI specification has been written to schemas/openapi.json");
        return Ok(());
    }

    let app = app.layer(Extension(Arc::new(api)));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on {}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
