use color_eyre::eyre::eyre;
use sqlx::PgPool;

use crate::domain::{Authority, Role, RoleName, RoleStore, RoleStoreError};

pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    name: String,
    authority: String,
}

#[async_trait::async_trait]
impl RoleStore for PostgresRoleStore {
    #[tracing::instrument(name = "Retrieving role from PostgreSQL", skip_all)]
    async fn find_by_name_role(
        &self,
        name: &RoleName,
    ) -> Result<Option<Role>, RoleStoreError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
                    SELECT name, authority
                    FROM roles
                    WHERE name = $1
                    "#,
        )
        .bind(name.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RoleStoreError::UnexpectedError(eyre!(e)))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let name = RoleName::parse(&row.name)
            .map_err(|e| RoleStoreError::UnexpectedError(eyre!(e)))?;
        Ok(Some(Role::new(name, Authority::new(row.authority))))
    }

    #[tracing::instrument(name = "Adding role to PostgreSQL", skip_all)]
    async fn add_role(&mut self, role: Role) -> Result<Role, RoleStoreError> {
        sqlx::query(
            r#"
            INSERT INTO roles (name, authority) VALUES ($1, $2)
            "#,
        )
        .bind(role.name.as_ref())
        .bind(role.authority.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RoleStoreError::RoleAlreadyExists
            }
            err => RoleStoreError::UnexpectedError(eyre!(err)),
        })?;

        Ok(role)
    }
}
