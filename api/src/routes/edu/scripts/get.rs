use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use db::models::script::ScriptFilter;
use serde::Deserialize;

use super::common::ScriptResponse;
use crate::response::{ok, service_error};
use crate::routes::common::ListResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListScriptsQuery {
    pub keyword: Option<String>,
    pub difficulty: Option<i16>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// GET /api/space/{space_id}/edu/scripts
///
/// Lists enabled scripts visible from the space: the space's own team and public
/// scripts plus every public script.
///
/// ### Query Parameters
/// - `keyword` (optional): matched against name and description
/// - `difficulty` (optional): 1 easy, 2 medium, 3 hard
/// - `page` (optional, default 1), `page_size` (optional, default 20, max 100)
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "code": 0,
///   "msg": "Scripts retrieved successfully",
///   "data": { "list": [ { "id": 1, "name": "Weather bot", "difficulty": 1 } ], "total": 1, "page": 1, "page_size": 20 }
/// }
/// ```
pub async fn list_scripts(
    State(state): State<AppState>,
    Path(space_id): Path<i64>,
    Query(query): Query<ListScriptsQuery>,
) -> Response {
    let filter = ScriptFilter {
        keyword: query.keyword,
        difficulty: query.difficulty,
    };

    match state
        .scripts
        .list_scripts(space_id, &filter, query.page, query.page_size)
        .await
    {
        Ok(page) => ok(
            ListResponse::paged(
                page.items.into_iter().map(ScriptResponse::from).collect(),
                page.total,
                page.page,
                page.page_size,
            ),
            "Scripts retrieved successfully",
        ),
        Err(err) => service_error(err, "Failed to retrieve scripts"),
    }
}

/// GET /api/space/{space_id}/edu/scripts/{script_id}
///
/// - `200 OK` with the script, including its stage templates
/// - `404 Not Found` if no such script exists
pub async fn get_script(
    State(state): State<AppState>,
    Path((_space_id, script_id)): Path<(i64, i64)>,
) -> Response {
    match state.scripts.get_script(script_id).await {
        Ok(script) => ok(ScriptResponse::from(script), "Script retrieved successfully"),
        Err(err) => service_error(err, "Failed to retrieve script"),
    }
}
