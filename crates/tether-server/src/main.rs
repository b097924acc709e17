mod auth;
mod config;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use auth::HttpAuthenticator;
use config::ServiceConfig;
use tether_domain::{ChannelService, ThingService, XidProvider};
use tether_http::{build_router, AppState};
use tether_memory::{InMemoryChannelRepository, InMemoryThingRepository, SequentialIdProvider};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_telemetry(&config.log_level);

    info!(
        http_host = %config.http_host,
        http_port = config.http_port,
        users_url = %config.users_url,
        "starting tether service"
    );

    let authenticator = Arc::new(HttpAuthenticator::new(config.users_url.clone()));
    let auth_timeout = Duration::from_millis(config.auth_timeout_ms);

    // Reference wiring: in-memory stores with sequential, zero-padded ids.
    // Each resource kind gets its own provider so creation ranks stay
    // contiguous per kind; device keys draw from xid instead.
    let thing_repo = Arc::new(InMemoryThingRepository::new());
    let channel_repo = Arc::new(InMemoryChannelRepository::new(thing_repo.clone()));

    let things = Arc::new(ThingService::new(
        authenticator.clone(),
        thing_repo,
        Arc::new(SequentialIdProvider::new()),
        Arc::new(XidProvider),
        auth_timeout,
    ));
    let channels = Arc::new(ChannelService::new(
        authenticator,
        channel_repo,
        Arc::new(SequentialIdProvider::new()),
        auth_timeout,
    ));

    let app = build_router(AppState { things, channels });

    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind listener: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
