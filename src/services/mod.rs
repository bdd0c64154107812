mod argon2_password_hasher;
pub mod data_stores;
mod role_service;
mod user_service;

pub use argon2_password_hasher::*;
pub use role_service::*;
pub use user_service::*;
