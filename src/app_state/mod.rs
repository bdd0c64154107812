use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{PasswordHasher, RoleStore, UpdateMode, UserStore};
use crate::services::{RoleService, UserService};

pub type UserStoreType = Arc<RwLock<dyn UserStore + Send + Sync>>;
pub type RoleStoreType = Arc<RwLock<dyn RoleStore + Send + Sync>>;
pub type PasswordHasherType = Arc<dyn PasswordHasher + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStoreType,
    pub role_store: RoleStoreType,
    pub role_service: RoleService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(
        user_store: UserStoreType,
        role_store: RoleStoreType,
        password_hasher: PasswordHasherType,
        update_mode: UpdateMode,
    ) -> Self {
        let role_service = RoleService::new(role_store.clone());
        let user_service = UserService::new(
            user_store.clone(),
            role_service.clone(),
            password_hasher,
            update_mode,
        );

        Self {
            user_store,
            role_store,
            role_service,
            user_service,
        }
    }
}
