//! Identity-provider event payloads.

use serde::{Deserialize, Serialize};

use crate::models::profile::{ProviderEntry, UserProfile};

/// Identity record pushed with auth `created`/`deleted` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub metadata: IdentityMetadata,
    #[serde(default)]
    pub provider_data: Vec<ProviderEntry>,
}

/// Creation/sign-in timestamps attached to an identity record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityMetadata {
    pub creation_time: Option<String>,
    pub last_sign_in_time: Option<String>,
}

impl UserProfile {
    /// Build the initial profile snapshot for a freshly created identity.
    ///
    /// Counters start at zero, `lastActivity` at None, `isAdmin` false.
    pub fn from_identity(identity: &IdentityRecord) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
            email_verified: identity.email_verified,
            disabled: identity.disabled,
            created_at: identity.metadata.creation_time.clone(),
            last_login_at: identity.metadata.last_sign_in_time.clone(),
            provider_data: identity.provider_data.clone(),
            is_admin: false,
            total_books: 0,
            total_libraries: 0,
            last_activity: None,
        }
    }
}
