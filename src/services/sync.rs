// SPDX-License-Identifier: MIT

//! Profile aggregate synchronization.
//!
//! Seven stateless handlers keep each user's profile document in sync:
//! two lifecycle handlers tied to identity events, and five counter
//! handlers tied to book/library subcollection changes. Handlers run
//! independently; all coordination is the store transaction inside
//! [`FirestoreDb::apply_counter_delta`].

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{BookRecord, CounterField, IdentityRecord, UserProfile};

/// Trigger handlers for identity and subcollection events.
#[derive(Clone)]
pub struct SyncService {
    db: FirestoreDb,
}

impl SyncService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    // ─── Profile Lifecycle ───────────────────────────────────────

    /// Identity created: write the initial profile snapshot.
    ///
    /// Overwrites any pre-existing document unconditionally.
    pub async fn identity_created(&self, identity: &IdentityRecord) -> Result<()> {
        let profile = UserProfile::from_identity(identity);
        self.db.upsert_profile(&profile).await?;
        tracing::info!(uid = %identity.uid, "Profile created for new identity");
        Ok(())
    }

    /// Identity deleted: remove the profile document.
    ///
    /// Unconditional and idempotent; in-flight subcollection triggers for
    /// the same user are not waited for (an accepted race — a straggler
    /// delta recreates a skeleton document that is orphaned, not corrupt).
    pub async fn identity_deleted(&self, uid: &str) -> Result<()> {
        self.db.delete_profile(uid).await?;
        tracing::info!(uid, "Profile deleted for removed identity");
        Ok(())
    }

    // ─── Subcollection Triggers ──────────────────────────────────

    /// Book created: increment `totalBooks` and record the book's
    /// timestamp as `lastActivity`.
    pub async fn book_created(&self, uid: &str, book: &BookRecord) -> Result<()> {
        let activity = book.activity_timestamp();
        self.db
            .apply_counter_delta(uid, CounterField::TotalBooks, 1, Some(&activity))
            .await?;
        Ok(())
    }

    /// Book updated: no counter changes, only `lastActivity` moves.
    pub async fn book_updated(&self, uid: &str, book: &BookRecord) -> Result<()> {
        let activity = book.activity_timestamp();
        self.db.set_last_activity(uid, &activity).await?;
        Ok(())
    }

    /// Book deleted: decrement `totalBooks`. `lastActivity` is left alone.
    pub async fn book_deleted(&self, uid: &str) -> Result<()> {
        self.db
            .apply_counter_delta(uid, CounterField::TotalBooks, -1, None)
            .await?;
        Ok(())
    }

    /// Library created: increment `totalLibraries`.
    pub async fn library_created(&self, uid: &str) -> Result<()> {
        self.db
            .apply_counter_delta(uid, CounterField::TotalLibraries, 1, None)
            .await?;
        Ok(())
    }

    /// Library deleted: decrement `totalLibraries`.
    pub async fn library_deleted(&self, uid: &str) -> Result<()> {
        self.db
            .apply_counter_delta(uid, CounterField::TotalLibraries, -1, None)
            .await?;
        Ok(())
    }
}
