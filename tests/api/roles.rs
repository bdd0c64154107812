use crate::helpers::{role, role_name, TestApp};
use account_registry::domain::{AccountError, Authority, Role};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_store_new_role(app: &mut TestApp) {
    app.add_role("ADMIN").await;

    let stored = app
        .state
        .role_service
        .find_by_name_role(&role_name("ADMIN"))
        .await
        .expect("Lookup should not fail")
        .expect("Role should exist");
    assert_eq!(stored.authority, Authority::new("ROLE_ADMIN"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_taken_role_name(app: &mut TestApp) {
    app.add_role("ADMIN").await;

    let duplicate = Role::new(role_name("ADMIN"), Authority::new("ROLE_ROOT"));
    let error = app
        .state
        .role_service
        .add_new_role(duplicate)
        .await
        .expect_err("Second role with the same name should fail");

    assert!(matches!(error, AccountError::NameConflict(_)));
    assert_eq!(error.to_string(), "Role name taken");

    let stored = app
        .state
        .role_store
        .read()
        .await
        .find_by_name_role(&role_name("ADMIN"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.authority,
        Authority::new("ROLE_ADMIN"),
        "The first role must survive the conflict"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_none_for_unknown_role(app: &mut TestApp) {
    app.add_role("USER").await;

    let found = app
        .state
        .role_service
        .find_by_name_role(&role("ADMIN").name)
        .await
        .expect("Lookup should not fail");
    assert!(found.is_none());
}
