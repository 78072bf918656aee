pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod redis_client;
pub mod repository;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use repository::PgEventRepository;
use services::{BuyTicketsUseCase, PartnerSelector};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub cache: cache::CacheService,
    pub events: PgEventRepository,
    pub buy_tickets: BuyTicketsUseCase<PgEventRepository>,
}

impl AppState {
    pub async fn new(config: &config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database).await?;
        info!("Database connected");

        db.run_migrations().await?;

        let redis = redis_client::RedisClient::new(&config.redis.url).await?;
        info!("Redis connected");
        let cache = cache::CacheService::new(redis, config.redis.cache_ttl_seconds);

        let partners = PartnerSelector::from_config(&config.partners)?;
        info!("Partner endpoints configured: {:?}", config.partners.endpoints);

        let events = db.event_repository();
        let buy_tickets = BuyTicketsUseCase::new(events.clone(), partners);

        Ok(Arc::new(Self {
            cache,
            events,
            buy_tickets,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Event Checkout API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
