use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use vt_api::{create_app, telemetry, AccountStore, AppState};
use vt_core::repositories::ChannelRepository;
use vt_core::services::{BcryptPasswordHasher, MediaStore, TokenIssuer};
use vt_infra::{CloudinaryMediaStore, InMemoryMediaStore, InMemoryStore};
use vt_shared::config::{AppConfig, MediaBackend, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);
    config.validate().context("Invalid configuration")?;

    info!(environment = %config.environment, "Starting VidTube API server");

    let tokens = Arc::new(TokenIssuer::new((&config.auth.jwt).into()));
    let hasher = Arc::new(BcryptPasswordHasher::default());

    match config.database.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            with_media(&config, Arc::clone(&store), store, hasher, tokens).await
        }
        StorageBackend::Mysql => {
            let pool = vt_infra::DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to MySQL")?;
            pool.ping().await.context("MySQL did not answer")?;
            pool.ensure_schema().await.context("Failed to prepare schema")?;
            info!("Using MySQL storage");

            let accounts = Arc::new(vt_infra::MySqlAccountRepository::new(pool.get_pool().clone()));
            let channels = Arc::new(vt_infra::MySqlChannelRepository::new(pool.get_pool().clone()));
            let result = with_media(&config, accounts, channels, hasher, tokens).await;
            pool.close().await;
            result
        }
    }
}

async fn with_media<A, C>(
    config: &AppConfig,
    accounts: Arc<A>,
    channels: Arc<C>,
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<TokenIssuer>,
) -> anyhow::Result<()>
where
    A: AccountStore,
    C: ChannelRepository + 'static,
{
    match config.media.backend {
        MediaBackend::Memory => {
            let base_url = format!("http://{}/media", config.server.bind_address());
            let media = Arc::new(InMemoryMediaStore::new(base_url));
            serve(config, accounts, channels, media, hasher, tokens).await
        }
        MediaBackend::Cloudinary => {
            let media = Arc::new(
                CloudinaryMediaStore::new(&config.media)
                    .context("Failed to configure Cloudinary")?,
            );
            serve(config, accounts, channels, media, hasher, tokens).await
        }
    }
}

async fn serve<A, C, M>(
    config: &AppConfig,
    accounts: Arc<A>,
    channels: Arc<C>,
    media: Arc<M>,
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<TokenIssuer>,
) -> anyhow::Result<()>
where
    A: AccountStore,
    C: ChannelRepository + 'static,
    M: MediaStore + 'static,
{
    let state = web::Data::new(AppState::new(
        accounts,
        channels,
        media,
        hasher,
        tokens,
        config.auth.cookies.clone(),
    ));
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    let mut server =
        HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    info!(address = %bind_address, "Listening");
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;
    Ok(())
}
