use crate::domain::{Role, RoleName, RoleStore, RoleStoreError};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapRoleStore {
    roles: HashMap<RoleName, Role>,
}

#[async_trait::async_trait]
impl RoleStore for HashmapRoleStore {
    async fn find_by_name_role(
        &self,
        name: &RoleName,
    ) -> Result<Option<Role>, RoleStoreError> {
        Ok(self.roles.get(name).cloned())
    }

    async fn add_role(&mut self, role: Role) -> Result<Role, RoleStoreError> {
        if self.roles.contains_key(&role.name) {
            return Err(RoleStoreError::RoleAlreadyExists);
        }

        self.roles.insert(role.name.clone(), role.clone());
        Ok(role)
    }
}
