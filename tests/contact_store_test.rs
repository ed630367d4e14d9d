//! Contact service tests against a real (in-memory SQLite) store.

mod common;

use common::{caller, contact_input, contact_service, contact_store, test_database};
use contact_book::errors::AppError;
use contact_book::infra::ContactRepository;
use contact_book::services::ContactService;

// =============================================================================
// Ownership scoping
// =============================================================================

#[tokio::test]
async fn test_created_contact_visible_only_to_owner() {
    let db = test_database().await;
    let service = contact_service(&db);

    let created = service
        .create_contact(&caller("u1"), contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.owner_user_id, "u1");
    assert_eq!(created.version, 1);

    assert_eq!(service.list_contacts(&caller("u1")).await.unwrap().len(), 1);
    assert!(service.list_contacts(&caller("u2")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_foreign_contact_is_not_found() {
    let db = test_database().await;
    let service = contact_service(&db);

    let owned = service
        .create_contact(&caller("u1"), contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    let result = service.get_contact(&caller("u2"), owned.id).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    let mut edit = contact_input("Hijacked", "999999999", "evil@x.com");
    edit.id = Some(owned.id);
    let result = service.update_contact(&caller("u2"), owned.id, edit).await;
    assert!(matches!(result, Err(AppError::NotFound)));

    // Idempotent success, but the row survives
    service.delete_contact(&caller("u2"), owned.id).await.unwrap();

    let still_there = service.get_contact(&caller("u1"), owned.id).await.unwrap();
    assert_eq!(still_there, owned);
}

#[tokio::test]
async fn test_get_missing_contact_is_not_found() {
    let db = test_database().await;
    let service = contact_service(&db);

    let result = service.get_contact(&caller("u1"), 999).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_client_supplied_owner_is_ignored() {
    let db = test_database().await;
    let service = contact_service(&db);

    let mut input = contact_input("John", "123456789", "j@x.com");
    input.owner_user_id = Some("u2".to_string());

    let created = service.create_contact(&caller("u1"), input).await.unwrap();
    assert_eq!(created.owner_user_id, "u1");
    assert!(service.list_contacts(&caller("u2")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_returns_only_callers_rows() {
    let db = test_database().await;
    let service = contact_service(&db);

    for (owner, name) in [("u1", "Ann"), ("u2", "Bob"), ("u1", "Cid")] {
        service
            .create_contact(&caller(owner), contact_input(name, "123456789", "a@b.com"))
            .await
            .unwrap();
    }

    let mut names: Vec<String> = service
        .list_contacts(&caller("u1"))
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    names.sort();

    assert_eq!(names, vec!["Ann", "Cid"]);
}

// =============================================================================
// Create / Update
// =============================================================================

#[tokio::test]
async fn test_invalid_contact_not_persisted() {
    let db = test_database().await;
    let service = contact_service(&db);

    let result = service
        .create_contact(&caller("u1"), contact_input("John", "12345", "bad"))
        .await;

    match result {
        Err(AppError::InvalidInput(invalid)) => {
            assert!(invalid.has_field("phone"));
            assert!(invalid.has_field("email"));
            assert_eq!(invalid.input.phone, "12345");
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }

    assert!(service.list_contacts(&caller("u1")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_phone_leading_zeros_survive_storage() {
    let db = test_database().await;
    let service = contact_service(&db);

    let created = service
        .create_contact(&caller("u1"), contact_input("Zed", "000012345", "z@x.com"))
        .await
        .unwrap();

    let fetched = service.get_contact(&caller("u1"), created.id).await.unwrap();
    assert_eq!(fetched.phone, "000012345");
}

#[tokio::test]
async fn test_edit_then_get_reflects_changes() {
    let db = test_database().await;
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    let mut edit = contact_input("Johnny", "987654321", "johnny@x.com");
    edit.id = Some(created.id);
    let updated = service.update_contact(&u1, created.id, edit).await.unwrap();

    assert_eq!(updated.version, created.version + 1);

    let fetched = service.get_contact(&u1, created.id).await.unwrap();
    assert_eq!(fetched.name, "Johnny");
    assert_eq!(fetched.phone, "987654321");
    assert_eq!(fetched.email, "johnny@x.com");
    assert_eq!(fetched.owner_user_id, "u1");
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_id_mismatch_leaves_row_untouched() {
    let db = test_database().await;
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    let mut edit = contact_input("Other", "111111111", "o@x.com");
    edit.id = Some(created.id + 1);
    let result = service.update_contact(&u1, created.id, edit).await;

    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(service.get_contact(&u1, created.id).await.unwrap(), created);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_stale_version_is_conflict() {
    let db = test_database().await;
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    let mut first = contact_input("First", "123456789", "j@x.com");
    first.id = Some(created.id);
    first.version = Some(created.version);
    service.update_contact(&u1, created.id, first).await.unwrap();

    // Second writer still holds the original version
    let mut second = contact_input("Second", "123456789", "j@x.com");
    second.id = Some(created.id);
    second.version = Some(created.version);
    let result = service.update_contact(&u1, created.id, second).await;

    assert!(matches!(result, Err(AppError::ConcurrencyConflict)));
    assert_eq!(service.get_contact(&u1, created.id).await.unwrap().name, "First");
}

#[tokio::test]
async fn test_update_after_concurrent_delete_is_not_found() {
    let db = test_database().await;
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    service.delete_contact(&u1, created.id).await.unwrap();

    let mut edit = contact_input("Johnny", "123456789", "j@x.com");
    edit.id = Some(created.id);
    edit.version = Some(created.version);
    let result = service.update_contact(&u1, created.id, edit).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let db = test_database().await;
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    service.delete_contact(&u1, created.id).await.unwrap();
    service.delete_contact(&u1, created.id).await.unwrap();
    service.delete_contact(&u1, 12345).await.unwrap();

    assert!(service.list_contacts(&u1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_repository_reports_whether_row_was_removed() {
    let db = test_database().await;
    let store = contact_store(&db);
    let service = contact_service(&db);
    let u1 = caller("u1");

    let created = service
        .create_contact(&u1, contact_input("John", "123456789", "j@x.com"))
        .await
        .unwrap();

    assert!(store.exists_for_owner(created.id, &u1).await.unwrap());
    assert!(!store.delete_for_owner(created.id, &caller("u2")).await.unwrap());
    assert!(store.delete_for_owner(created.id, &u1).await.unwrap());
    assert!(!store.delete_for_owner(created.id, &u1).await.unwrap());
    assert!(!store.exists_for_owner(created.id, &u1).await.unwrap());
}
