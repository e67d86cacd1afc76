use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use identity_auth::StudentAuthenticator;
use identity_cache::RedisTokenStore;
use identity_config::{ApiConfig, Config, CorsConfig};
use identity_db::{PgStudentsRepository, init_db_pool};
use identity_events::{RedisStreamProducer, StudentsGateway};

use crate::modules::students::service::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: StudentAuthenticator,
    pub students: StudentService,
    pub api_config: ApiConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        authenticator: StudentAuthenticator,
        students: StudentService,
        api_config: ApiConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            authenticator,
            students,
            api_config,
            cors_config,
        }
    }
}

/// Connects Postgres and Redis and wires the services on top of them.
pub async fn init_app_state(config: &Config) -> anyhow::Result<AppState> {
    let pool = init_db_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    info!("Database pool ready");

    let redis = identity_cache::connect(&config.redis)
        .await
        .context("failed to connect to the memory database")?;

    let repository = Arc::new(PgStudentsRepository::new(pool));
    let tokens = Arc::new(RedisTokenStore::new(
        redis.clone(),
        config.redis.key_prefix.clone(),
    ));
    let events = Arc::new(StudentsGateway::new(Arc::new(RedisStreamProducer::new(redis))));

    Ok(AppState::new(
        StudentAuthenticator::new_jwt(repository.clone(), tokens, &config.auth),
        StudentService::new(repository, events),
        config.api.clone(),
        config.cors.clone(),
    ))
}
