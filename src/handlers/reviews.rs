//! Reviews endpoint
//!
//! `GET` lists reviews (all of one group, or the latest across the
//! directory); `POST` submits a review after rating validation.

use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::response::{self, parse_body, parse_query};
use crate::models::CreateReviewRequest;
use crate::state::AppState;
use crate::utils::errors::{DirectoryError, Result};
use crate::utils::helpers::parse_id_param;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewsQuery {
    pub group_id: Option<String>,
}

pub async fn handle(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match *req.method() {
        Method::OPTIONS => Ok(response::preflight()),
        Method::GET => {
            get(parse_query(req.query_string())?, &state).await
        }
        Method::POST => post(&body, &state).await,
        _ => Err(DirectoryError::MethodNotAllowed { method: req.method().to_string() }),
    }
}

async fn get(query: ReviewsQuery, state: &AppState) -> Result<HttpResponse> {
    let group_id = query
        .group_id
        .as_deref()
        .and_then(|raw| parse_id_param("group_id", raw))
        .transpose()
        .map_err(DirectoryError::Validation)?;

    let reviews = match group_id {
        Some(group_id) => state.db.reviews.list_for_group(group_id).await?,
        None => state.db.reviews.list_recent().await?,
    };

    Ok(response::json(StatusCode::OK, &reviews))
}

async fn post(body: &[u8], state: &AppState) -> Result<HttpResponse> {
    let request: CreateReviewRequest = parse_body(body)?;
    let review_id = state.db.create_review(request).await?;

    Ok(response::json(
        StatusCode::CREATED,
        &json!({ "id": review_id, "message": "Review created successfully" }),
    ))
}
