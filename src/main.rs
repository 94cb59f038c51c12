//! Tuza USSD service binary.
//!
//! Loads configuration, connects PostgreSQL, wires the adapters into the
//! turn handler and serves the gateway callback endpoint.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tuza_ussd::adapters::http::ussd::{ussd_routes, UssdAppState};
use tuza_ussd::adapters::position::StoredPosition;
use tuza_ussd::adapters::postgres::{
    PostgresClaimReader, PostgresClaimRepository, PostgresFacilityReader, PostgresSessionStore,
    PostgresSubjectReader, PostgresSubscriberRepository,
};
use tuza_ussd::application::handlers::ussd::{HandleUssdTurn, MenuSettings};
use tuza_ussd::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("connected to postgres");

    let position = Arc::new(StoredPosition::new(Arc::new(PostgresSessionStore::new(
        pool.clone(),
    ))));
    let handler = Arc::new(HandleUssdTurn::new(
        position,
        Arc::new(PostgresSubscriberRepository::new(pool.clone())),
        Arc::new(PostgresFacilityReader::new(pool.clone())),
        Arc::new(PostgresSubjectReader::new(pool.clone())),
        Arc::new(PostgresClaimRepository::new(pool.clone())),
        Arc::new(PostgresClaimReader::new(pool)),
        MenuSettings {
            reset_code: config.ussd.service_code.clone(),
            daily_storage_fee: config.ussd.daily_storage_fee,
            history_limit: config.ussd.history_limit,
        },
    ));

    let app = ussd_routes(UssdAppState::new(handler, config.ussd.reply_encoding)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            ))),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "tuza ussd service listening");

    axum::serve(listener, app).await?;
    Ok(())
}
