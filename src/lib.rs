// SPDX-License-Identifier: MIT

//! Shelfkeeper: aggregate sync service for a personal book library.
//!
//! Receives pushed identity and Firestore document-change events and keeps
//! the denormalized counters (`totalBooks`, `totalLibraries`) and the
//! `lastActivity` timestamp on each user's profile document in sync.

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::SyncService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sync: SyncService,
}
