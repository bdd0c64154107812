use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

use crate::domain::UpdateMode;

lazy_static! {
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref USER_UPDATE_MODE: UpdateMode = set_update_mode();
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn set_update_mode() -> UpdateMode {
    let value = load_or_default(env::USER_UPDATE_MODE_ENV_VAR, "compatible");
    UpdateMode::parse(&value)
        .expect("USER_UPDATE_MODE must be compatible or corrected.")
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) if !value.is_empty() => value,
        _ => String::from(default_value),
    }
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const USER_UPDATE_MODE_ENV_VAR: &str = "USER_UPDATE_MODE";
}

pub const MAX_DB_CONNECTIONS: u32 = 5;
