//! Liveness probe backed by a database round trip

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::handlers::response;
use crate::state::AppState;

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.db.health_check().await {
        Ok(()) => response::json(StatusCode::OK, &json!({ "status": "ok" })),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            response::json(
                StatusCode::SERVICE_UNAVAILABLE,
                &json!({ "status": "unavailable" }),
            )
        }
    }
}
