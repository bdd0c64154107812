use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Level;

pub mod app_state;
pub mod domain;
pub mod services;
pub mod utils;

use app_state::AppState;
use domain::{AccountError, UpdateMode};
use services::{
    data_stores::{
        HashmapRoleStore, HashmapUserStore, PostgresRoleStore,
        PostgresUserStore,
    },
    Argon2PasswordHasher,
};
use utils::constants::{MAX_DB_CONNECTIONS, USER_UPDATE_MODE};

/// Logs an account error at the level its kind deserves: caller mistakes at
/// DEBUG, anything unexpected at ERROR.
pub fn log_account_error(error: &AccountError) {
    let level = match error {
        AccountError::UnexpectedError(_) => Level::ERROR,
        _ => Level::DEBUG,
    };
    log_error_chain(error, level);
}

pub fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(url.expose_secret())
        .await
}

/// Wires both services over PostgreSQL-backed stores, using the update mode
/// configured through `USER_UPDATE_MODE`.
pub fn postgres_app_state(pool: PgPool) -> AppState {
    postgres_app_state_with_mode(pool, *USER_UPDATE_MODE)
}

pub fn postgres_app_state_with_mode(
    pool: PgPool,
    update_mode: UpdateMode,
) -> AppState {
    AppState::new(
        Arc::new(RwLock::new(PostgresUserStore::new(pool.clone()))),
        Arc::new(RwLock::new(PostgresRoleStore::new(pool))),
        Arc::new(Argon2PasswordHasher),
        update_mode,
    )
}

/// Wires both services over in-memory stores, using the update mode
/// configured through `USER_UPDATE_MODE`.
pub fn in_memory_app_state() -> AppState {
    in_memory_app_state_with_mode(*USER_UPDATE_MODE)
}

pub fn in_memory_app_state_with_mode(update_mode: UpdateMode) -> AppState {
    AppState::new(
        Arc::new(RwLock::new(HashmapUserStore::default())),
        Arc::new(RwLock::new(HashmapRoleStore::default())),
        Arc::new(Argon2PasswordHasher),
        update_mode,
    )
}
