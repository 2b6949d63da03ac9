use pronovetai_core::db::open_db_in_memory;
use pronovetai_core::{
    CoreConfig, RepoError, SqliteUserRepository, User, UserRepository, UserRole,
};

#[test]
fn create_and_find_by_username() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteUserRepository::new(&conn, &config);

    let mut user = User::new("mgarcia", UserRole::Manager);
    user.email = Some("mgarcia@example.com".to_string());
    let id = repo.create_user(&user).unwrap();

    let loaded = repo.find_by_username("mgarcia").unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.role, UserRole::Manager);
    assert!(loaded.is_active);
    // date_joined defaults storage-side and localizes on read.
    assert!(loaded.date_joined.is_some());

    assert!(repo.find_by_username("nobody").unwrap().is_none());
}

#[test]
fn deactivation_is_soft_and_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteUserRepository::new(&conn, &config);

    let id = repo.create_user(&User::new("jdelacruz", UserRole::User)).unwrap();

    repo.deactivate_user(id).unwrap();
    repo.deactivate_user(id).unwrap();

    // The row survives deactivation.
    let loaded = repo.get_user(id).unwrap().unwrap();
    assert!(!loaded.is_active);

    repo.reactivate_user(id).unwrap();
    assert!(repo.get_user(id).unwrap().unwrap().is_active);

    assert!(matches!(
        repo.deactivate_user(9999).unwrap_err(),
        RepoError::NotFound { entity: "user", .. }
    ));
}

#[test]
fn listing_hides_inactive_by_default() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteUserRepository::new(&conn, &config);

    repo.create_user(&User::new("active_one", UserRole::User)).unwrap();
    let dormant = repo
        .create_user(&User::new("dormant_one", UserRole::User))
        .unwrap();
    repo.deactivate_user(dormant).unwrap();

    let visible = repo.list_users(false).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].username, "active_one");

    let everyone = repo.list_users(true).unwrap();
    assert_eq!(everyone.len(), 2);
}

#[test]
fn update_changes_role() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteUserRepository::new(&conn, &config);

    let mut user = User::new("promotee", UserRole::User);
    let id = repo.create_user(&user).unwrap();
    user.id = id;
    user.role = UserRole::Admin;
    repo.update_user(&user).unwrap();

    let loaded = repo.get_user(id).unwrap().unwrap();
    assert_eq!(loaded.role, UserRole::Admin);
}

#[test]
fn duplicate_username_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let config = CoreConfig::default();
    let repo = SqliteUserRepository::new(&conn, &config);

    repo.create_user(&User::new("unique_name", UserRole::User)).unwrap();
    let err = repo
        .create_user(&User::new("unique_name", UserRole::User))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}
