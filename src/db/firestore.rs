// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for the `users` profile collection:
//! - Profile lifecycle (create/delete, keyed by uid)
//! - Transactional counter deltas (the aggregation core)
//! - Opportunistic `lastActivity` merges

use crate::db::collections;
use crate::error::AppError;
use crate::models::{CounterField, UserProfile};
use serde::{Deserialize, Serialize};

/// Commit attempts before giving up on a contended profile document.
/// A failed invocation is redelivered by the platform anyway.
const TXN_MAX_ATTEMPTS: u32 = 5;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Lifecycle ───────────────────────────────────────

    /// Write the full profile document, overwriting any existing one.
    ///
    /// Last-writer-wins by design: the identity provider is the source of
    /// truth at creation time, and a redelivered create event simply resets
    /// the snapshot.
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.uid)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete the profile document for a uid.
    ///
    /// Deleting a non-existent document is not an error.
    pub async fn delete_profile(&self, uid: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(uid)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a profile by uid.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Counter Updates ─────────────────────────────────────────

    /// Apply a signed delta to one counter field of a profile document,
    /// optionally recording a `lastActivity` timestamp in the same write.
    ///
    /// The read-modify-write runs inside a Firestore transaction so that
    /// concurrent deltas against the same document are serialized; on commit
    /// conflict the whole sequence is retried with fresh data. A missing
    /// document or a missing/non-numeric field reads as zero, and the result
    /// is clamped at zero, so delivery anomalies degrade to a wrong-but-sane
    /// counter instead of an error. The masked merge write creates the
    /// document if the lifecycle create was lost or reordered.
    ///
    /// Note: event redelivery is not deduplicated, so a duplicate delivery
    /// applies its delta twice.
    ///
    /// Returns the committed counter value.
    pub async fn apply_counter_delta(
        &self,
        uid: &str,
        field: CounterField,
        delta: i64,
        last_activity: Option<&str>,
    ) -> Result<i64, AppError> {
        let client = self.get_client()?;

        let mut update_mask = vec!["uid", field.field_name()];
        if last_activity.is_some() {
            update_mask.push("lastActivity");
        }

        let mut attempt = 1;
        loop {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            // Read through the transaction so the document lands in the
            // read set for conflict detection.
            let txn_reader = client.clone_with_consistency_selector(
                firestore::FirestoreConsistencySelector::Transaction(
                    transaction.transaction_id().clone(),
                ),
            );

            let snapshot: Option<CounterSnapshot> = txn_reader
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(uid)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to read profile in transaction: {}", e))
                })?;

            let current = snapshot.map(|s| s.get(field)).unwrap_or(0);
            let next = (current + delta).max(0);

            let write = CounterWrite {
                uid: uid.to_string(),
                total_books: next,
                total_libraries: next,
                last_activity: last_activity.map(str::to_string),
            };

            client
                .fluent()
                .update()
                .fields(update_mask.clone())
                .in_col(collections::USERS)
                .document_id(uid)
                .object(&write)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add counter write to transaction: {}", e))
                })?;

            match transaction.commit().await {
                Ok(_) => {
                    tracing::debug!(
                        uid,
                        field = field.field_name(),
                        delta,
                        value = next,
                        "Counter delta committed"
                    );
                    return Ok(next);
                }
                Err(e) if attempt < TXN_MAX_ATTEMPTS => {
                    tracing::warn!(
                        uid,
                        field = field.field_name(),
                        attempt,
                        error = %e,
                        "Counter transaction conflict, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    return Err(AppError::Database(format!(
                        "Transaction commit failed after {} attempts: {}",
                        attempt, e
                    )));
                }
            }
        }
    }

    /// Merge a `lastActivity` timestamp into the profile without touching
    /// any counter.
    ///
    /// Used by the book-update path, where no numeric field changes and a
    /// last-writer-wins timestamp is acceptable.
    pub async fn set_last_activity(&self, uid: &str, timestamp: &str) -> Result<(), AppError> {
        let write = LastActivityWrite {
            uid: uid.to_string(),
            last_activity: timestamp.to_string(),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(["uid", "lastActivity"])
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&write)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Counter fields as read inside the transaction.
///
/// Deserialization is deliberately lenient: a missing or non-numeric value
/// reads as zero rather than failing the invocation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterSnapshot {
    #[serde(default, deserialize_with = "lenient_counter")]
    total_books: i64,
    #[serde(default, deserialize_with = "lenient_counter")]
    total_libraries: i64,
}

impl CounterSnapshot {
    fn get(&self, field: CounterField) -> i64 {
        match field {
            CounterField::TotalBooks => self.total_books,
            CounterField::TotalLibraries => self.total_libraries,
        }
    }
}

fn lenient_counter<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer).unwrap_or(serde_json::Value::Null);
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(0))
}

/// Masked counter write; only `uid`, the targeted counter field, and (when
/// set) `lastActivity` appear in the update mask, so the other fields here
/// never reach the document.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterWrite {
    uid: String,
    total_books: i64,
    total_libraries: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_activity: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LastActivityWrite {
    uid: String,
    last_activity: String,
}
