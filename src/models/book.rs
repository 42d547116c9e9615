//! Book document fields consulted by the sync service.

use serde::{Deserialize, Serialize};

/// Book document under `users/{uid}/collection/{bookId}`.
///
/// The document is owned by the frontend; only the activity timestamps are
/// read here. Everything else is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Last edit time (ISO 8601), set by the frontend on updates
    pub updated_at: Option<String>,
    /// Time the book was added (ISO 8601)
    pub added_at: Option<String>,
}

impl BookRecord {
    /// Timestamp to record as the profile's `lastActivity`.
    ///
    /// Preference order: `updatedAt`, then `addedAt`, then the current time
    /// (a record may carry neither).
    pub fn activity_timestamp(&self) -> String {
        self.updated_at
            .clone()
            .or_else(|| self.added_at.clone())
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339())
    }
}
