// SPDX-License-Identifier: MIT

//! Integration tests for the profile lifecycle handlers.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set).

use shelfkeeper::models::{IdentityMetadata, IdentityRecord, ProviderEntry, UserProfile};

mod common;

fn test_identity(uid: &str) -> IdentityRecord {
    IdentityRecord {
        uid: uid.to_string(),
        email: Some(format!("{}@example.com", uid)),
        display_name: Some("Test Reader".to_string()),
        photo_url: None,
        email_verified: true,
        disabled: false,
        metadata: IdentityMetadata {
            creation_time: Some("2024-01-01T00:00:00Z".to_string()),
            last_sign_in_time: Some("2024-06-01T00:00:00Z".to_string()),
        },
        provider_data: vec![ProviderEntry {
            provider_id: "google.com".to_string(),
            email: Some(format!("{}@example.com", uid)),
        }],
    }
}

#[tokio::test]
async fn test_identity_created_materializes_profile() {
    require_emulator!();
    let sync = common::test_sync().await;
    let db = common::test_db().await;
    let uid = common::unique_uid("lifecycle-create");

    sync.identity_created(&test_identity(&uid))
        .await
        .expect("identity_created failed");

    let profile = db
        .get_profile(&uid)
        .await
        .expect("get_profile failed")
        .expect("Profile document not found");

    assert_eq!(profile.uid, uid);
    assert_eq!(profile.email.as_deref(), Some(format!("{}@example.com", uid).as_str()));
    assert_eq!(profile.total_books, 0);
    assert_eq!(profile.total_libraries, 0);
    assert!(profile.last_activity.is_none());
    assert!(!profile.is_admin);
    assert_eq!(profile.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(profile.last_login_at.as_deref(), Some("2024-06-01T00:00:00Z"));
    assert_eq!(profile.provider_data.len(), 1);
}

#[tokio::test]
async fn test_identity_created_overwrites_existing_document() {
    require_emulator!();
    let sync = common::test_sync().await;
    let db = common::test_db().await;
    let uid = common::unique_uid("lifecycle-overwrite");

    // Pre-existing document with non-zero counters (e.g. left over from a
    // recycled uid). Creation must reset it, not merge into it.
    let mut stale = UserProfile::from_identity(&test_identity(&uid));
    stale.total_books = 7;
    stale.total_libraries = 3;
    stale.last_activity = Some("2020-01-01T00:00:00Z".to_string());
    db.upsert_profile(&stale).await.expect("seed failed");

    sync.identity_created(&test_identity(&uid))
        .await
        .expect("identity_created failed");

    let profile = db
        .get_profile(&uid)
        .await
        .expect("get_profile failed")
        .expect("Profile document not found");

    assert_eq!(profile.total_books, 0);
    assert_eq!(profile.total_libraries, 0);
    assert!(profile.last_activity.is_none());
}

#[tokio::test]
async fn test_identity_create_then_delete_leaves_no_document() {
    require_emulator!();
    let sync = common::test_sync().await;
    let db = common::test_db().await;
    let uid = common::unique_uid("lifecycle-delete");

    sync.identity_created(&test_identity(&uid))
        .await
        .expect("identity_created failed");
    sync.identity_deleted(&uid)
        .await
        .expect("identity_deleted failed");

    let profile = db.get_profile(&uid).await.expect("get_profile failed");
    assert!(profile.is_none(), "Profile should be gone after deletion");
}

#[tokio::test]
async fn test_identity_deleted_is_idempotent() {
    require_emulator!();
    let sync = common::test_sync().await;
    let uid = common::unique_uid("lifecycle-missing");

    // Deleting a profile that never existed must not error.
    sync.identity_deleted(&uid)
        .await
        .expect("identity_deleted on missing profile failed");
    sync.identity_deleted(&uid)
        .await
        .expect("second identity_deleted failed");
}
