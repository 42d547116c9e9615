//! User profile aggregate stored in Firestore.
//!
//! One document per identity, keyed by `uid` in the `users` collection.
//! Identity fields are a snapshot taken at creation and never refreshed;
//! only the counters and `lastActivity` change afterwards.

use serde::{Deserialize, Serialize};

/// Per-user aggregate profile document.
///
/// Stored at: `users/{uid}`
///
/// Counter fields are updated atomically via Firestore transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity key, also the document ID. Immutable.
    pub uid: String,
    /// Email address (may be None if the provider did not share one)
    pub email: Option<String>,
    /// Display name snapshot
    pub display_name: Option<String>,
    /// Profile picture URL snapshot
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Whether the email was verified at creation time
    #[serde(default)]
    pub email_verified: bool,
    /// Whether the account was disabled at creation time
    #[serde(default)]
    pub disabled: bool,
    /// Account creation time (ISO 8601), captured once
    pub created_at: Option<String>,
    /// Last sign-in time (ISO 8601), captured once
    pub last_login_at: Option<String>,
    /// Linked provider snapshot, in provider order
    #[serde(default)]
    pub provider_data: Vec<ProviderEntry>,
    /// Admin flag, managed out-of-band; never written by this service
    /// after creation
    #[serde(default)]
    pub is_admin: bool,
    /// Number of book documents under `users/{uid}/collection`
    #[serde(default)]
    pub total_books: i64,
    /// Number of library documents under `users/{uid}/libraries`
    #[serde(default)]
    pub total_libraries: i64,
    /// Most recent book activity (ISO 8601), None until the first book write
    #[serde(default)]
    pub last_activity: Option<String>,
}

/// One linked identity provider, snapshot at profile creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry {
    pub provider_id: String,
    pub email: Option<String>,
}

/// The counter fields a delta may target.
///
/// A closed enumeration rather than a free-form field name, so a typo can
/// never mint a new counter on the profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    TotalBooks,
    TotalLibraries,
}

impl CounterField {
    /// Stored field name on the profile document.
    pub fn field_name(&self) -> &'static str {
        match self {
            CounterField::TotalBooks => "totalBooks",
            CounterField::TotalLibraries => "totalLibraries",
        }
    }
}
