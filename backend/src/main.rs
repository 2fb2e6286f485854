//! Pet registry entry-point: loads settings, opens the record store and
//! serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pet_registry::inbound::http::health::HealthState;
use pet_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerConfig, ServerSettings, build_backend, create_server, prepare_state};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;

    let backend = build_backend(&settings).await?;
    let http_state = prepare_state(&settings, &backend).await?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    let server = create_server(health_state.clone(), http_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "pet registry listening");

    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
