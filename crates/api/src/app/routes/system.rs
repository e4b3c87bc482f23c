use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};

use stockroom_products::PALETTE;

use crate::context::PrincipalContext;

/// Liveness only; no dependency checks.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": principal.principal_id().to_string(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    }))
}

/// Suggested colors for product forms.
pub async fn colors() -> impl IntoResponse {
    Json(PALETTE)
}
