mod data_stores;
mod email;
mod error;
mod password;
mod password_hasher;
mod principal;
mod role;
mod update_mode;
mod user;
mod user_id;
mod user_password_hash;

pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use password::*;
pub use password_hasher::*;
pub use principal::*;
pub use role::*;
pub use update_mode::*;
pub use user::*;
pub use user_id::*;
pub use user_password_hash::*;
