// SPDX-License-Identifier: MIT

//! Trigger routes for pushed platform events.
//!
//! One POST route per trigger, mirroring the deployed function list. A 2xx
//! or 4xx response acknowledges the event; a 5xx response makes the platform
//! redeliver it (the at-least-once contract the sync logic is built around).

use crate::db::collections;
use crate::error::{AppError, Result};
use crate::events::DocumentEvent;
use crate::models::{BookRecord, IdentityRecord};
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use std::sync::Arc;

/// Trigger routes (called by the platform's event push).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/triggers/auth/user-created", post(user_created))
        .route("/triggers/auth/user-deleted", post(user_deleted))
        .route("/triggers/firestore/book-created", post(book_created))
        .route("/triggers/firestore/book-updated", post(book_updated))
        .route("/triggers/firestore/book-deleted", post(book_deleted))
        .route("/triggers/firestore/library-created", post(library_created))
        .route("/triggers/firestore/library-deleted", post(library_deleted))
}

/// Identity created: materialize the profile document.
async fn user_created(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<IdentityRecord>,
) -> Result<StatusCode> {
    if identity.uid.is_empty() {
        return Err(AppError::BadRequest("Identity event has empty uid".to_string()));
    }
    state.sync.identity_created(&identity).await?;
    Ok(StatusCode::OK)
}

/// Identity deleted: remove the profile document.
async fn user_deleted(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<IdentityRecord>,
) -> Result<StatusCode> {
    if identity.uid.is_empty() {
        return Err(AppError::BadRequest("Identity event has empty uid".to_string()));
    }
    state.sync.identity_deleted(&identity.uid).await?;
    Ok(StatusCode::OK)
}

/// Book document created under `users/{uid}/collection`.
async fn book_created(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEvent<BookRecord>>,
) -> Result<StatusCode> {
    let uid = event.owner_uid(collections::BOOKS)?;
    let book = event.after.clone().unwrap_or_default();
    state.sync.book_created(uid, &book).await?;
    Ok(StatusCode::OK)
}

/// Book document updated: only `lastActivity` moves.
async fn book_updated(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEvent<BookRecord>>,
) -> Result<StatusCode> {
    let uid = event.owner_uid(collections::BOOKS)?;
    let book = event.after.clone().unwrap_or_default();
    state.sync.book_updated(uid, &book).await?;
    Ok(StatusCode::OK)
}

/// Book document deleted.
async fn book_deleted(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEvent<BookRecord>>,
) -> Result<StatusCode> {
    let uid = event.owner_uid(collections::BOOKS)?;
    state.sync.book_deleted(uid).await?;
    Ok(StatusCode::OK)
}

/// Library document created under `users/{uid}/libraries`.
///
/// Only existence matters; the snapshot is never inspected.
async fn library_created(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEvent<serde_json::Value>>,
) -> Result<StatusCode> {
    let uid = event.owner_uid(collections::LIBRARIES)?;
    state.sync.library_created(uid).await?;
    Ok(StatusCode::OK)
}

/// Library document deleted.
async fn library_deleted(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEvent<serde_json::Value>>,
) -> Result<StatusCode> {
    let uid = event.owner_uid(collections::LIBRARIES)?;
    state.sync.library_deleted(uid).await?;
    Ok(StatusCode::OK)
}
