//! Groups endpoint
//!
//! One resource, dispatched by method and query flags:
//! - `GET ?stats=true` rating statistics for every group
//! - `GET ?analytics=<id>` social analytics of one group
//! - `GET ?search=&platform=&sort=` the directory listing
//! - `POST` with `groupId` updates a group, without it creates one

use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::handlers::response::{self, invalid_body, parse_body, parse_query};
use crate::models::{CreateGroupRequest, GroupFilter, UpdateGroupRequest};
use crate::state::AppState;
use crate::utils::errors::{DirectoryError, Result};
use crate::utils::helpers::parse_id_param;

#[derive(Debug, Default, Deserialize)]
pub struct GroupsQuery {
    pub search: Option<String>,
    pub platform: Option<String>,
    pub sort: Option<String>,
    pub stats: Option<String>,
    pub analytics: Option<String>,
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

async fn get(query: GroupsQuery, state: &AppState) -> Result<HttpResponse> {
    if query.stats.as_deref().map_or(false, |v| v.eq_ignore_ascii_case("true")) {
        let stats = state.db.groups.stats().await?;
        return Ok(response::json(StatusCode::OK, &json!({ "stats": stats })));
    }

    if let Some(raw) = query.analytics.as_deref() {
        if let Some(group_id) = parse_id_param("group id", raw) {
            let group_id = group_id.map_err(DirectoryError::Validation)?;
            let source = state.db.analytics_source(group_id).await?;
            debug!(group_id = group_id, platform = %source.platform, "Fetching group analytics");
            let report = state.analytics.for_group(&source).await;
            return Ok(response::json(StatusCode::OK, &report));
        }
    }

    let filter = GroupFilter::new(query.search, query.platform, query.sort.as_deref());
    let groups = state.db.groups.list(&filter).await?;
    Ok(response::json(StatusCode::OK, &groups))
}

async fn post(body: &[u8], state: &AppState) -> Result<HttpResponse> {
    let payload: Value = parse_body(body)?;

    if is_update(&payload) {
        let request: UpdateGroupRequest = serde_json::from_value(payload).map_err(invalid_body)?;
        let group_id = state.db.update_group(request).await?;
        return Ok(response::json(
            StatusCode::OK,
            &json!({ "success": true, "id": group_id, "message": "Group updated successfully" }),
        ));
    }

    let request: CreateGroupRequest = serde_json::from_value(payload).map_err(invalid_body)?;
    let group_id = state.db.create_group(request).await?;
    Ok(response::json(
        StatusCode::CREATED,
        &json!({ "id": group_id, "message": "Group created successfully" }),
    ))
}

/// A body names an existing group when it carries a non-empty `groupId`
fn is_update(payload: &Value) -> bool {
    match payload.get("groupId") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
