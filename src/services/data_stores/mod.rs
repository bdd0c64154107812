mod hashmap_role_store;
mod hashmap_user_store;
mod postgres_role_store;
mod postgres_user_store;

pub use hashmap_role_store::*;
pub use hashmap_user_store::*;
pub use postgres_role_store::*;
pub use postgres_user_store::*;
