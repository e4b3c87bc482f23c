use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;

use stockroom_auth::Permission;
use stockroom_core::{DomainError, ProductId};

use crate::app::routes::common::CmdAuth;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/:id/print", get(print_product))
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>().map_err(|e| match e {
        DomainError::InvalidId(msg) => errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        other => errors::service_error_to_response(other.into()),
    })
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, axum::response::Response> {
    body.map(|Json(v)| v)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", e.body_text()))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    let request = services.queries.page_request(query.page(), query.per_page());
    match services.queries.list(query.search(), request).await {
        Ok(page) => (StatusCode::OK, Json(dto::product_page_to_dto(page, &query))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.queries.get(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let body = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let cmd_auth = CmdAuth::new(dto::product_input_from_json(&body), Permission::PRODUCTS_CREATE);
    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::forbidden(e);
    }

    let (input, decode_errors) = cmd_auth.inner;
    match services.commands.create_with(input, decode_errors).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match parse_body(body) {
        Ok(v) => v,
        Err(resp) => {
            // An unknown id outranks a malformed body.
            if let Err(e) = services.queries.get(id).await {
                return errors::service_error_to_response(e);
            }
            return resp;
        }
    };

    let cmd_auth = CmdAuth::new(dto::product_input_from_json(&body), Permission::PRODUCTS_UPDATE);
    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::forbidden(e);
    }

    let (input, decode_errors) = cmd_auth.inner;
    match services.commands.update_with(id, input, decode_errors).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let cmd_auth = CmdAuth::new(id, Permission::PRODUCTS_DELETE);
    if let Err(e) = crate::authz::authorize_command(&principal, &cmd_auth) {
        return errors::forbidden(e);
    }

    match services.commands.delete(cmd_auth.inner).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Printable report; the page opens the print dialog itself.
pub async fn print_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let product = match services.queries.get(id).await {
        Ok(p) => p,
        Err(e) => return errors::service_error_to_response(e),
    };
    match services.reports.render_product(&product, Utc::now()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => errors::report_error(e),
    }
}
