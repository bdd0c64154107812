use crate::helpers::{
    email, new_user, role, role_name, update_for, CorrectedPostgresTestApp,
    PostgresTestApp,
};
use account_registry::domain::{
    AccountError, NewUserRecord, RoleStoreError, UserStoreError,
};
use account_registry::services::EMAIL_TAKEN;
use test_context::test_context;

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_persist_and_list_users_in_id_order(ctx: &mut PostgresTestApp) {
    let first = ctx.app.add_user("a@x.com", "pw1").await;
    let second = ctx.app.add_user("b@x.com", "pw2").await;

    let users = ctx.app.state.user_service.get_all_users().await.unwrap();
    let ids: Vec<_> = users.iter().map(|user| user.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let found = ctx
        .app
        .state
        .user_service
        .get_user_by_email(&email("b@x.com"))
        .await
        .unwrap()
        .expect("User should be stored");
    assert_eq!(found.id, second.id);
    assert_eq!(found.profile, second.profile);
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_map_unique_email_violation(ctx: &mut PostgresTestApp) {
    let existing = ctx.app.add_user("a@x.com", "pw1").await;

    // Bypasses the service check so the constraint itself is hit.
    let error = ctx
        .app
        .state
        .user_store
        .write()
        .await
        .add_user(NewUserRecord {
            email: email("a@x.com"),
            hash: existing.hash.clone(),
            profile: existing.profile.clone(),
            enabled: true,
        })
        .await
        .expect_err("duplicate email should violate the unique constraint");
    assert_eq!(error, UserStoreError::UserAlreadyExists);

    let error = ctx
        .app
        .state
        .user_service
        .add_new_user(new_user("a@x.com", "pw2"))
        .await
        .expect_err("taken email should be rejected");
    assert!(matches!(&error, AccountError::NameConflict(msg) if msg == EMAIL_TAKEN));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_map_email_conflict_on_update(ctx: &mut PostgresTestApp) {
    ctx.app.add_user("a@x.com", "pw1").await;
    let other = ctx.app.add_user("b@x.com", "pw2").await;

    let mut update = update_for(&other, "pw2");
    update.email = email("a@x.com");
    let error = ctx
        .app
        .state
        .user_service
        .update_user(update)
        .await
        .expect_err("moving onto a taken email should fail");
    assert!(matches!(&error, AccountError::NameConflict(msg) if msg == EMAIL_TAKEN));

    let stored = ctx
        .app
        .state
        .user_service
        .get_user_by_id(&other.id)
        .await
        .unwrap();
    assert_eq!(stored.email, email("b@x.com"));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_reject_duplicate_role_in_store(ctx: &mut PostgresTestApp) {
    ctx.app.add_role("ADMIN").await;

    let error = ctx
        .app
        .state
        .role_store
        .write()
        .await
        .add_role(role("ADMIN"))
        .await
        .expect_err("role names are primary keys");
    assert!(matches!(error, RoleStoreError::RoleAlreadyExists));
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_persist_role_assignment(ctx: &mut PostgresTestApp) {
    ctx.app.add_role("ADMIN").await;
    ctx.app.add_role("USER").await;
    let user = ctx.app.add_user("a@x.com", "pw1").await;
    let service = &ctx.app.state.user_service;

    service
        .add_role_to_user(&email("a@x.com"), &role_name("ADMIN"))
        .await
        .unwrap();
    service
        .add_role_to_user(&email("a@x.com"), &role_name("USER"))
        .await
        .unwrap();
    service
        .add_role_to_user(&email("a@x.com"), &role_name("ADMIN"))
        .await
        .unwrap();

    let stored = service.get_user_by_id(&user.id).await.unwrap();
    assert_eq!(stored.roles.len(), 2);
    assert!(stored.has_role(&role("ADMIN")));
    assert!(stored.has_role(&role("USER")));

    let principal = service.load_principal(&email("a@x.com")).await.unwrap();
    assert_eq!(principal.authorities.len(), 2);
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_clear_persisted_roles_on_update(ctx: &mut PostgresTestApp) {
    ctx.app.add_role("ADMIN").await;
    let user = ctx.app.add_user("a@x.com", "pw1").await;
    let service = &ctx.app.state.user_service;
    let user = service
        .add_role_to_user(&email("a@x.com"), &role_name("ADMIN"))
        .await
        .unwrap();

    service.update_user(update_for(&user, "pw1")).await.unwrap();

    let stored = service.get_user_by_id(&user.id).await.unwrap();
    assert!(stored.roles.is_empty());
}

#[test_context(CorrectedPostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_keep_persisted_roles_in_corrected_mode(
    ctx: &mut CorrectedPostgresTestApp,
) {
    let ctx = &ctx.0;
    ctx.app.add_role("ADMIN").await;
    ctx.app.add_user("a@x.com", "pw1").await;
    let service = &ctx.app.state.user_service;
    let user = service
        .add_role_to_user(&email("a@x.com"), &role_name("ADMIN"))
        .await
        .unwrap();

    let mut update = update_for(&user, "pw1");
    update.enabled = false;
    service.update_user(update).await.unwrap();

    let stored = service.get_user_by_id(&user.id).await.unwrap();
    assert!(stored.has_role(&role("ADMIN")));
    assert!(!stored.enabled);
    assert_eq!(stored.hash, user.hash, "Unchanged password is not rehashed");
}

#[test_context(PostgresTestApp)]
#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn should_delete_user_and_role_links(ctx: &mut PostgresTestApp) {
    ctx.app.add_role("ADMIN").await;
    let user = ctx.app.add_user("a@x.com", "pw1").await;
    let service = &ctx.app.state.user_service;
    service
        .add_role_to_user(&email("a@x.com"), &role_name("ADMIN"))
        .await
        .unwrap();

    service.delete_user(&user.id).await.unwrap();

    let error = service.get_user_by_id(&user.id).await.unwrap_err();
    assert!(matches!(error, AccountError::NotFound(_)));
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_roles")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert_eq!(links, 0);

    let error = service.delete_user(&user.id).await.unwrap_err();
    assert!(matches!(error, AccountError::NotFound(_)));
}
