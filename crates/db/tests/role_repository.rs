//! Postgres store tests. These need a database:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p rolegate-db -- --ignored
//! ```

use assert_matches::assert_matches;
use rolegate_core::role::{Role, UserRef};
use rolegate_core::store::{RoleStore, StoreError, UserDirectory};
use rolegate_db::repositories::UserRepo;
use rolegate_db::{PgRoleStore, PgUserDirectory};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> UserRef {
    UserRepo::create(pool, username)
        .await
        .expect("user creation should succeed")
        .into()
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_full_bootstrap(pool: PgPool) {
    rolegate_db::health_check(&pool).await.unwrap();

    for table in ["users", "roles", "role_members"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_resolve_skips_unknown_usernames(pool: PgPool) {
    seed_user(&pool, "alice").await;
    let directory = PgUserDirectory::new(pool);

    let found = directory
        .resolve(&["alice".to_string(), "ghost".to_string()])
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_role_with_members(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let store = PgRoleStore::new(pool);

    let created = store
        .try_create(&Role::new("ops", [alice, bob]))
        .await
        .unwrap();
    assert!(created.id > 0);

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "ops");
    assert_eq!(found.usernames(), vec!["alice", "bob"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unique_name_constraint_maps_to_name_taken(pool: PgPool) {
    let store = PgRoleStore::new(pool);
    store.try_create(&Role::new("ops", [])).await.unwrap();

    let err = store.try_create(&Role::new("ops", [])).await.unwrap_err();

    assert_matches!(err, StoreError::NameTaken(ref n) if n == "ops");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_into_taken_name_maps_to_name_taken(pool: PgPool) {
    let store = PgRoleStore::new(pool);
    store.try_create(&Role::new("ops", [])).await.unwrap();
    let dev = store.try_create(&Role::new("dev", [])).await.unwrap();

    let mut renamed = dev.clone();
    renamed.name = "ops".into();
    let err = store.update(&renamed).await.unwrap_err();

    assert_matches!(err, StoreError::NameTaken(ref n) if n == "ops");
    let unchanged = store.find_by_id(dev.id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "dev");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_nul_in_input_is_rejected_not_backend_failure(pool: PgPool) {
    let store = PgRoleStore::new(pool.clone());
    let directory = PgUserDirectory::new(pool);

    let err = store
        .try_create(&Role::new("ops\u{0}", []))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Rejected(_));

    let err = directory
        .resolve(&["al\u{0}ice".to_string()])
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Rejected(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_member_id_is_rejected(pool: PgPool) {
    let store = PgRoleStore::new(pool);
    let phantom = UserRef {
        id: 4242,
        username: "phantom".into(),
    };

    let err = store
        .try_create(&Role::new("ops", [phantom]))
        .await
        .unwrap_err();

    assert_matches!(err, StoreError::Rejected(_));
    assert!(store.find_by_name("ops").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_replaces_members(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let store = PgRoleStore::new(pool);
    let created = store
        .try_create(&Role::new("ADMIN", [alice.clone()]))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.members = [alice, bob].into_iter().collect();
    store.update(&changed).await.unwrap();

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.usernames(), vec!["alice", "bob"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_role_is_not_found(pool: PgPool) {
    let store = PgRoleStore::new(pool);
    let mut ghost = Role::new("ghost", []);
    ghost.id = 999;

    let err = store.update(&ghost).await.unwrap_err();

    assert_eq!(err, StoreError::NotFound(999));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_cascades_memberships(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let store = PgRoleStore::new(pool.clone());
    let created = store.try_create(&Role::new("ops", [alice])).await.unwrap();

    assert!(store.delete_by_id(created.id).await.unwrap());
    assert!(!store.delete_by_id(created.id).await.unwrap());

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM role_members")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);
}
