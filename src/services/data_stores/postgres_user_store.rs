use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;

use crate::domain::{
    Authority, Email, NewUserRecord, Profile, Role, RoleName, User, UserId,
    UserPasswordHash, UserStore, UserStoreError,
};

/// Expects the `users`, `roles` and `user_roles` tables to exist, with a
/// unique constraint on `users.email`.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn roles_for(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, HashSet<Role>>, UserStoreError> {
        let rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
                    SELECT ur.user_id, r.name, r.authority
                    FROM user_roles ur
                    JOIN roles r ON r.name = ur.role_name
                    WHERE ur.user_id = ANY($1)
                    "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        let mut roles: HashMap<i64, HashSet<Role>> = HashMap::new();
        for row in rows {
            let name = RoleName::parse(&row.name)
                .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;
            roles
                .entry(row.user_id)
                .or_default()
                .insert(Role::new(name, Authority::new(row.authority)));
        }
        Ok(roles)
    }

    async fn with_roles(
        &self,
        rows: Vec<UserRow>,
    ) -> Result<Vec<User>, UserStoreError> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut roles = self.roles_for(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let user_roles = roles.remove(&row.id).unwrap_or_default();
                row.into_user(user_roles)
            })
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    enabled: bool,
}

impl UserRow {
    fn into_user(self, roles: HashSet<Role>) -> Result<User, UserStoreError> {
        Ok(User {
            id: UserId::new(self.id),
            email: Email::parse(Secret::new(self.email))
                .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?,
            hash: UserPasswordHash::parse(Secret::new(self.password_hash))
                .map_err(UserStoreError::UnexpectedError)?,
            profile: Profile::new(
                self.first_name,
                self.last_name,
                self.date_of_birth,
            ),
            enabled: self.enabled,
            roles,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRoleRow {
    user_id: i64,
    name: String,
    authority: String,
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            UserStoreError::UserAlreadyExists
        }
        err => UserStoreError::UnexpectedError(eyre!(err)),
    }
}

const SELECT_USERS: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, date_of_birth, enabled
    FROM users
"#;

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE email = $1",
            SELECT_USERS
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        Ok(self.with_roles(rows).await?.pop())
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<User>, UserStoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE id = $1",
            SELECT_USERS
        ))
        .bind(id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        Ok(self.with_roles(rows).await?.pop())
    }

    #[tracing::instrument(name = "Checking user exists in PostgreSQL", skip_all)]
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, UserStoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#,
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Retrieving all users from PostgreSQL", skip_all)]
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} ORDER BY id",
            SELECT_USERS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        self.with_roles(rows).await
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(
        &mut self,
        record: NewUserRecord,
    ) -> Result<User, UserStoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, date_of_birth, enabled)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.email.as_ref().expose_secret())
        .bind(record.hash.as_ref().expose_secret())
        .bind(&record.profile.first_name)
        .bind(&record.profile.last_name)
        .bind(record.profile.date_of_birth)
        .bind(record.enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(User::from_record(UserId::new(id), record))
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(
        &mut self,
        user: &User,
    ) -> Result<User, UserStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, first_name = $4,
                last_name = $5, date_of_birth = $6, enabled = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_ref())
        .bind(user.email.as_ref().expose_secret())
        .bind(user.hash.as_ref().expose_secret())
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(user.profile.date_of_birth)
        .bind(user.enabled)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        sqlx::query(r#"DELETE FROM user_roles WHERE user_id = $1"#)
            .bind(user.id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        for role in &user.roles {
            sqlx::query(
                r#"INSERT INTO user_roles (user_id, role_name) VALUES ($1, $2)"#,
            )
            .bind(user.id.as_ref())
            .bind(role.name.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        Ok(user.clone())
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_by_id(
        &mut self,
        id: &UserId,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
