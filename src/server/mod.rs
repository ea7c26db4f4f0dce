pub mod handlers;

use crate::{
    Result,
    config::Config,
    gemini::GeminiClient,
    relay::{RelayHandler, RelaySettings},
};
use axum::{Router, routing::any};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(state: handlers::AppState, relay_path: &str) -> Router {
    let mut router = Router::new().route("/", any(handlers::relay));
    if relay_path != "/" {
        router = router.route(relay_path, any(handlers::relay));
    }

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

pub fn build_state(config: &Config) -> handlers::AppState {
    let client = GeminiClient::new(config.gemini.clone());
    info!("Relaying to model {}", client.model());

    let settings = RelaySettings {
        api_key: config.gemini.api_key.clone(),
        development: config.development,
    };

    handlers::AppState {
        relay: Arc::new(RelayHandler::new(settings, Arc::new(client))),
    }
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = build_state(&config);

    if !app_state.relay.has_credential() {
        warn!("GEMINI_API_KEY is not set; every relay request will fail until it is configured");
    }
    if config.development {
        warn!("Development mode enabled; error responses include cause chains");
    }

    let app = router(app_state, &config.server.relay_path);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (relay path {})",
        addr, config.server.relay_path
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
