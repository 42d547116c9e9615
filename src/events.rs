// SPDX-License-Identifier: MIT

//! Document-change event envelopes pushed by the platform.

use serde::Deserialize;

use crate::error::AppError;

/// A Firestore document-change notification.
///
/// `before` is absent for creates, `after` for deletes. The document path is
/// relative to the database root, e.g. `users/u1/collection/b1`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentEvent<T> {
    /// Path of the changed document
    pub document: String,
    /// Snapshot before the change (absent on create)
    pub before: Option<T>,
    /// Snapshot after the change (absent on delete)
    pub after: Option<T>,
}

impl<T> DocumentEvent<T> {
    /// Extract the owning user id from the document path.
    ///
    /// The path must match `users/{uid}/{subcollection}/{docId}` with a
    /// non-empty uid and document id.
    pub fn owner_uid(&self, subcollection: &str) -> Result<&str, AppError> {
        let mut segments = self.document.split('/');
        match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some("users"), Some(uid), Some(sub), Some(doc_id), None)
                if !uid.is_empty() && sub == subcollection && !doc_id.is_empty() =>
            {
                Ok(uid)
            }
            _ => Err(AppError::BadRequest(format!(
                "Unexpected document path: {}",
                self.document
            ))),
        }
    }
}
