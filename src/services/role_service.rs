use crate::{
    app_state::RoleStoreType,
    domain::{AccountError, Role, RoleName, RoleStoreError},
    log_account_error,
};

pub const ROLE_NAME_TAKEN: &str = "Role name taken";

#[derive(Clone)]
pub struct RoleService {
    role_store: RoleStoreType,
}

impl RoleService {
    pub fn new(role_store: RoleStoreType) -> Self {
        Self { role_store }
    }

    #[tracing::instrument(name = "Add new role", skip_all)]
    pub async fn add_new_role(&self, role: Role) -> Result<Role, AccountError> {
        tracing::info!("Saving new role {} to database", role.name);
        self.insert_role(role).await.inspect_err(log_account_error)
    }

    /// Absence is an ordinary outcome here, not an error.
    #[tracing::instrument(name = "Find role by name", skip_all)]
    pub async fn find_by_name_role(
        &self,
        name: &RoleName,
    ) -> Result<Option<Role>, AccountError> {
        self.role_store
            .read()
            .await
            .find_by_name_role(name)
            .await
            .map_err(|e| AccountError::UnexpectedError(e.into()))
            .inspect_err(log_account_error)
    }

    async fn insert_role(&self, role: Role) -> Result<Role, AccountError> {
        let mut role_store = self.role_store.write().await;

        let existing = role_store
            .find_by_name_role(&role.name)
            .await
            .map_err(|e| AccountError::UnexpectedError(e.into()))?;
        if existing.is_some() {
            return Err(AccountError::NameConflict(ROLE_NAME_TAKEN.to_owned()));
        }

        role_store.add_role(role).await.map_err(|e| match e {
            RoleStoreError::RoleAlreadyExists => {
                AccountError::NameConflict(ROLE_NAME_TAKEN.to_owned())
            }
            err => AccountError::UnexpectedError(err.into()),
        })
    }
}
