// SPDX-License-Identifier: MIT

//! Middleware for trigger routes.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Header carrying the shared trigger secret.
pub const TRIGGER_SECRET_HEADER: &str = "x-trigger-secret";

/// Require the shared secret header on `/triggers/*` routes.
///
/// A no-op when no secret is configured (the platform's own push
/// authentication is assumed in that deployment).
pub async fn require_trigger_secret(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = state.config.trigger_secret.as_deref() {
        let presented = request
            .headers()
            .get(TRIGGER_SECRET_HEADER)
            .and_then(|h| h.to_str().ok());

        if presented != Some(expected) {
            tracing::warn!(
                present = presented.is_some(),
                "Blocked trigger request with missing or wrong secret"
            );
            return Err(StatusCode::FORBIDDEN);
        }
    }

    Ok(next.run(request).await)
}
