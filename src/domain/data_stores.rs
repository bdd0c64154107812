use super::{Email, NewUserRecord, Role, RoleName, User, UserId};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait UserStore {
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError>;
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<User>, UserStoreError>;
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, UserStoreError>;
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;
    /// Persists a new user and returns it with its assigned id.
    async fn add_user(
        &mut self,
        record: NewUserRecord,
    ) -> Result<User, UserStoreError>;
    /// Overwrites every field of an existing user, role set included.
    async fn update_user(&mut self, user: &User)
        -> Result<User, UserStoreError>;
    async fn delete_by_id(&mut self, id: &UserId)
        -> Result<(), UserStoreError>;
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait RoleStore {
    async fn find_by_name_role(
        &self,
        name: &RoleName,
    ) -> Result<Option<Role>, RoleStoreError>;
    async fn add_role(&mut self, role: Role) -> Result<Role, RoleStoreError>;
}

#[derive(Debug, Error)]
pub enum RoleStoreError {
    #[error("Role already exists")]
    RoleAlreadyExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for RoleStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::RoleAlreadyExists, Self::RoleAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
