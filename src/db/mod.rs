//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Profile documents, keyed by uid.
    pub const USERS: &str = "users";
    /// Book subcollection under each user (named `collection` in the app).
    pub const BOOKS: &str = "collection";
    /// Library subcollection under each user.
    pub const LIBRARIES: &str = "libraries";
}
