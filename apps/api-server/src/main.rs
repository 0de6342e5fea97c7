//! # Ripple API Server
//!
//! The main entry point: REST feed API and GraphQL endpoint on the HTTP
//! port, socket.io realtime channel on its own listener.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use socketioxide::SocketIo;
use tracing_actix_web::TracingLogger;

use ripple_core::ports::{Broadcaster, PasswordService, TokenService};
use ripple_infra::database::DatabaseConnections;
use ripple_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod graphql;
mod handlers;
mod middleware;
mod realtime;
mod state;
mod validation;

#[cfg(test)]
mod testing;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Ripple API Server on {}:{}",
        config.host,
        config.port
    );

    // The store is a hard dependency; refuse to start without it.
    let db = DatabaseConnections::init(&config.database)
        .await
        .map_err(std::io::Error::other)?;

    // Upload directory must exist before the first multipart request.
    std::fs::create_dir_all(&config.upload_dir)?;

    // Realtime channel: the broadcaster is built before the HTTP server
    // starts accepting connections and handed to handlers by reference.
    let (socket_layer, io) = SocketIo::new_layer();
    realtime::configure_socket_handlers(io.clone());
    let broadcaster: Arc<dyn Broadcaster> = Arc::new(realtime::SocketBroadcaster::new(io));

    let realtime_addr = (config.host.clone(), config.realtime_port);
    tokio::spawn(async move {
        if let Err(e) = realtime::serve(realtime_addr, socket_layer).await {
            tracing::error!("Realtime listener failed: {}", e);
        }
    });

    // Auth services
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    // Build application state
    let state = AppState::new(&db, broadcaster, config.upload_dir.clone());

    let schema = web::Data::new(graphql::create_schema());

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(schema.clone())
            .configure(handlers::configure_routes)
            .configure(graphql::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,ripple_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
