use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_auth::AuthzError;
use stockroom_core::{DomainError, ValidationErrors};
use stockroom_infra::ServiceError;
use stockroom_products::ReportError;

/// Map a query/command failure onto an HTTP response.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(errors)) => validation_error(errors),
        ServiceError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        ServiceError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "internal storage error")
        }
    }
}

pub fn forbidden(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn report_error(err: ReportError) -> axum::response::Response {
    tracing::error!(error = %err, "report rendering failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "report_error", err.to_string())
}

pub fn validation_error(errors: ValidationErrors) -> axum::response::Response {
    let message = errors
        .first_message()
        .unwrap_or("The given data was invalid.")
        .to_string();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": message,
            "errors": errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
