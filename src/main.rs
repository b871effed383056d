use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use taskserver::auth::PgUserStore;
use taskserver::core::config::AppConfig;
use taskserver::core::server::run_server;
use taskserver::core::state::AppState;
use taskserver::core::utils::{create_conn, run_migrations};
use taskserver::security::{JwtConfig, JwtManager};
use taskserver::tasks::PgTaskStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(into_io_error)?;

    let pool = create_conn(&config.database_url).map_err(into_io_error)?;
    run_migrations(&pool).map_err(into_io_error)?;
    info!("Database ready");

    let jwt = JwtManager::new(JwtConfig::default(), &config.auth.jwt_secret)
        .map_err(into_io_error)?
        .with_expiry(config.auth.token_expiry_minutes);

    let state = Arc::new(AppState {
        config: config.clone(),
        tasks: Arc::new(PgTaskStore::new(pool.clone())),
        users: Arc::new(PgUserStore::new(pool)),
        jwt: Arc::new(jwt),
    });

    run_server(state).await
}

fn into_io_error(e: anyhow::Error) -> std::io::Error {
    std::io::Error::other(format!("{e:#}"))
}
