use secrecy::ExposeSecret;

use crate::{
    app_state::{PasswordHasherType, UserStoreType},
    domain::{
        AccountError, AuthenticationPrincipal, Email, NewUser, NewUserRecord,
        Password, RoleName, UpdateMode, User, UserId, UserPasswordHash,
        UserStoreError, UserUpdate,
    },
    log_account_error,
};

use super::RoleService;

pub const EMAIL_TAKEN: &str = "Email taken";

/// User management on top of a [`UserStore`](crate::domain::UserStore).
///
/// Every operation holds the store lock for its whole read-check-write
/// sequence, so a failing check never leaves a partial write behind. Errors
/// are logged through [`log_account_error`] before they reach the caller.
#[derive(Clone)]
pub struct UserService {
    user_store: UserStoreType,
    role_service: RoleService,
    password_hasher: PasswordHasherType,
    update_mode: UpdateMode,
}

fn map_store_error(e: UserStoreError) -> AccountError {
    match e {
        UserStoreError::UserAlreadyExists => {
            AccountError::NameConflict(EMAIL_TAKEN.to_owned())
        }
        err => AccountError::UnexpectedError(err.into()),
    }
}

impl UserService {
    pub fn new(
        user_store: UserStoreType,
        role_service: RoleService,
        password_hasher: PasswordHasherType,
        update_mode: UpdateMode,
    ) -> Self {
        Self {
            user_store,
            role_service,
            password_hasher,
            update_mode,
        }
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Resolves a login identifier to the principal the authentication
    /// layer verifies credentials against.
    #[tracing::instrument(name = "Load principal", skip_all)]
    pub async fn load_principal(
        &self,
        email: &Email,
    ) -> Result<AuthenticationPrincipal, AccountError> {
        self.resolve_principal(email)
            .await
            .inspect_err(log_account_error)
    }

    #[tracing::instrument(name = "Get all users", skip_all)]
    pub async fn get_all_users(&self) -> Result<Vec<User>, AccountError> {
        tracing::info!("Fetching all users");
        self.user_store
            .read()
            .await
            .find_all()
            .await
            .map_err(map_store_error)
            .inspect_err(log_account_error)
    }

    #[tracing::instrument(name = "Get user by id", skip_all, fields(user_id = %id))]
    pub async fn get_user_by_id(&self, id: &UserId) -> Result<User, AccountError> {
        tracing::info!("Fetching user");
        self.user_store
            .read()
            .await
            .find_by_id(id)
            .await
            .map_err(map_store_error)
            .and_then(|user| {
                user.ok_or_else(|| AccountError::user_id_not_found(id))
            })
            .inspect_err(log_account_error)
    }

    /// Absence is an ordinary outcome here, unlike [`Self::get_user_by_id`].
    #[tracing::instrument(name = "Get user by email", skip_all)]
    pub async fn get_user_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, AccountError> {
        tracing::info!("Fetching user by email");
        self.user_store
            .read()
            .await
            .find_by_email(email)
            .await
            .map_err(map_store_error)
            .inspect_err(log_account_error)
    }

    #[tracing::instrument(name = "Delete user", skip_all, fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), AccountError> {
        tracing::info!("Delete user from database");
        self.remove_user(id).await.inspect_err(log_account_error)
    }

    #[tracing::instrument(name = "Add new user", skip_all)]
    pub async fn add_new_user(
        &self,
        new_user: NewUser,
    ) -> Result<User, AccountError> {
        tracing::info!("Saving new user to database");
        self.insert_user(new_user)
            .await
            .inspect_err(log_account_error)
    }

    /// Overwrites the mutable fields of an existing user.
    ///
    /// In [`UpdateMode::Compatible`] the role set is emptied on every call and
    /// the password is rehashed whenever the incoming plaintext differs from
    /// the stored hash string.
    #[tracing::instrument(name = "Update user", skip_all, fields(user_id = %update.id))]
    pub async fn update_user(
        &self,
        update: UserUpdate,
    ) -> Result<User, AccountError> {
        tracing::info!("Update user in database");
        self.apply_update(update)
            .await
            .inspect_err(log_account_error)
    }

    /// Grants a role to a user. Granting a role the user already holds
    /// changes nothing.
    #[tracing::instrument(name = "Add role to user", skip_all, fields(role = %role_name))]
    pub async fn add_role_to_user(
        &self,
        email: &Email,
        role_name: &RoleName,
    ) -> Result<User, AccountError> {
        tracing::info!("Adding role {} to user", role_name);
        self.grant_role(email, role_name)
            .await
            .inspect_err(log_account_error)
    }

    async fn resolve_principal(
        &self,
        email: &Email,
    ) -> Result<AuthenticationPrincipal, AccountError> {
        let user = self
            .user_store
            .read()
            .await
            .find_by_email(email)
            .await
            .map_err(map_store_error)?;

        match user {
            Some(user) => {
                tracing::info!(user_id = %user.id, "User found in the database");
                Ok(AuthenticationPrincipal::from(&user))
            }
            None => {
                tracing::error!("User not found in the database");
                Err(AccountError::AuthenticationPrincipalNotFound)
            }
        }
    }

    async fn remove_user(&self, id: &UserId) -> Result<(), AccountError> {
        let mut user_store = self.user_store.write().await;

        let exists = user_store
            .exists_by_id(id)
            .await
            .map_err(map_store_error)?;
        if !exists {
            return Err(AccountError::user_id_not_found(id));
        }

        user_store.delete_by_id(id).await.map_err(|e| match e {
            UserStoreError::UserNotFound => AccountError::user_id_not_found(id),
            err => map_store_error(err),
        })
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, AccountError> {
        let mut user_store = self.user_store.write().await;

        let existing = user_store
            .find_by_email(&new_user.email)
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            return Err(AccountError::NameConflict(EMAIL_TAKEN.to_owned()));
        }

        let hash = self.encode(&new_user.password).await?;
        let record = NewUserRecord {
            email: new_user.email,
            hash,
            profile: new_user.profile,
            enabled: new_user.enabled,
        };

        let user = user_store.add_user(record).await.map_err(map_store_error)?;
        tracing::info!(user_id = %user.id, "New user saved");
        Ok(user)
    }

    async fn apply_update(&self, update: UserUpdate) -> Result<User, AccountError> {
        let mut user_store = self.user_store.write().await;

        let mut user = user_store
            .find_by_id(&update.id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| AccountError::user_id_not_found(update.id))?;

        if user.email != update.email {
            user.email = update.email;
        }
        if user.profile.first_name != update.profile.first_name {
            user.profile.first_name = update.profile.first_name;
        }
        if user.profile.last_name != update.profile.last_name {
            user.profile.last_name = update.profile.last_name;
        }
        if user.profile.date_of_birth != update.profile.date_of_birth {
            user.profile.date_of_birth = update.profile.date_of_birth;
        }
        if self.password_changed(&user.hash, &update.password).await {
            user.hash = self.encode(&update.password).await?;
        }
        if user.enabled != update.enabled {
            user.enabled = update.enabled;
        }
        if self.update_mode == UpdateMode::Compatible {
            user.roles.clear();
        }

        user_store.update_user(&user).await.map_err(|e| match e {
            UserStoreError::UserNotFound => {
                AccountError::user_id_not_found(update.id)
            }
            err => map_store_error(err),
        })
    }

    async fn grant_role(
        &self,
        email: &Email,
        role_name: &RoleName,
    ) -> Result<User, AccountError> {
        let mut user_store = self.user_store.write().await;

        let mut user = user_store
            .find_by_email(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                AccountError::NotFound(format!(
                    "User with email {} does not exist",
                    email.as_ref().expose_secret()
                ))
            })?;

        let role = self
            .role_service
            .find_by_name_role(role_name)
            .await?
            .ok_or_else(|| {
                AccountError::NotFound(format!(
                    "Role {} does not exist",
                    role_name
                ))
            })?;

        if !user.roles.insert(role) {
            return Ok(user);
        }

        user_store.update_user(&user).await.map_err(map_store_error)
    }

    async fn encode(
        &self,
        password: &Password,
    ) -> Result<UserPasswordHash, AccountError> {
        self.password_hasher
            .encode(password)
            .await
            .map_err(AccountError::UnexpectedError)
    }

    async fn password_changed(
        &self,
        stored: &UserPasswordHash,
        candidate: &Password,
    ) -> bool {
        match self.update_mode {
            UpdateMode::Compatible => {
                stored.as_ref().expose_secret()
                    != candidate.as_ref().expose_secret()
            }
            UpdateMode::Corrected => self
                .password_hasher
                .verify(stored, candidate)
                .await
                .is_err(),
        }
    }
}
