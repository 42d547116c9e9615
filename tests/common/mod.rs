// SPDX-License-Identifier: MIT

use shelfkeeper::config::Config;
use shelfkeeper::db::FirestoreDb;
use shelfkeeper::routes::create_router;
use shelfkeeper::services::SyncService;
use shelfkeeper::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a sync service backed by the emulator.
#[allow(dead_code)]
pub async fn test_sync() -> SyncService {
    SyncService::new(test_db().await)
}

/// Generate a unique uid for test isolation.
#[allow(dead_code)]
pub fn unique_uid(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Create a test app with the given config and an offline mock database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = test_db_offline();
    let sync = SyncService::new(db.clone());

    let state = Arc::new(AppState { config, db, sync });

    (create_router(state.clone()), state)
}

/// Create a test app with default config and an offline mock database.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}
